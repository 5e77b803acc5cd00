// Common types and utilities shared across the application

pub mod error;
pub mod response;
pub mod utils;

pub use error::ApiError;
pub use response::ApiResponse;
