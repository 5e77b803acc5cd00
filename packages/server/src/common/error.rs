//! HTTP error taxonomy.
//!
//! Every failure that reaches a handler is converted into an `ApiError`, and
//! `ApiError` is the only place that picks a status code and a client message.
//! Internal detail stays in the logs.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::response::ApiResponse;
use crate::domains::auth::AuthError;
use crate::domains::users::UserError;
use crate::kernel::{OtpProviderError, StoreError};
use crate::server::middleware::TokenRejection;

/// Client-facing message for both a wrong code and an unknown identity.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid phone number or OTP code";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("OTP provider unavailable")]
    ProviderUnavailable,

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ProviderUnavailable => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => {
                msg.clone()
            }
            ApiError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            ApiError::ProviderUnavailable => {
                "Verification service is unavailable, please try again later".to_string()
            }
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::Storage(_) | ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = %status, "Request failed");
        }

        (status, Json(ApiResponse::error(self.client_message()))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::ProviderUnavailable(source) => source.into(),
            AuthError::UnknownIdentity { fingerprint } => {
                // Provider approved an identity we have no record for.
                error!(phone = %fingerprint, "Verified identity has no credential record");
                ApiError::InvalidCredentials
            }
            AuthError::Storage(source) => ApiError::Storage(source),
            AuthError::TokenIssue(source) => {
                ApiError::Internal(anyhow::anyhow!("failed to issue session token: {}", source))
            }
        }
    }
}

impl From<OtpProviderError> for ApiError {
    fn from(err: OtpProviderError) -> Self {
        warn!(error = %err, "OTP provider failure");
        ApiError::ProviderUnavailable
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Invalid(reason) => ApiError::Validation(reason),
            UserError::Storage(source) => ApiError::Storage(source),
        }
    }
}

impl From<TokenRejection> for ApiError {
    fn from(rejection: TokenRejection) -> Self {
        ApiError::Unauthorized(rejection.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
