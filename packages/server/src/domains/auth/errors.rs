use thiserror::Error;

use super::jwt::TokenError;
use crate::kernel::{OtpProviderError, StoreError};

/// Why a login attempt did not produce a session
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong or expired code
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("OTP provider unavailable: {0}")]
    ProviderUnavailable(#[source] OtpProviderError),

    /// The provider approved a phone number with no credential record
    #[error("no credential record for phone {fingerprint}")]
    UnknownIdentity { fingerprint: String },

    #[error("credential store error: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to issue token: {0}")]
    TokenIssue(#[source] TokenError),
}
