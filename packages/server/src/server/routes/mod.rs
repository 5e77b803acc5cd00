// HTTP routes
pub mod auth;
pub mod health;
pub mod locations;
pub mod users;
pub mod video_analyses;

pub use auth::*;
pub use health::*;
pub use locations::*;
pub use users::*;
pub use video_analyses::*;
