// Domain modules
pub mod auth;
pub mod locations;
pub mod users;
pub mod video_analysis;
