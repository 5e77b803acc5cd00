//! Locations domain - monitored sites and the cameras watching them

pub mod actions;
pub mod models;

pub use models::{Camera, Location};
