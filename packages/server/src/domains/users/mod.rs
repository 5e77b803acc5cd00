//! Users domain - admin access to officer credential records

pub mod actions;
pub mod errors;

pub use actions::{list_users, save_user};
pub use errors::UserError;
