//! Auth domain - phone number + OTP login issuing signed session tokens
//!
//! Responsibilities:
//! - Ask the OTP provider to send and check codes
//! - Map a verified phone number to its credential record
//! - Session/JWT token issuance and validation

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod types;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService, TokenError};
pub use types::AuthResponse;
