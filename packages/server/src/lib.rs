// Crowd Monitor - API Core
//
// Backend for field personnel: phone-number OTP login, signed session tokens,
// and read endpoints over crowd-monitoring data (locations, cameras, video analyses).

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
