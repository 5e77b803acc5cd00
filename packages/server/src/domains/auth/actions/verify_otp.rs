//! Verify OTP action - the login flow

use tracing::{info, instrument};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::phone_fingerprint;
use crate::domains::auth::types::AuthResponse;
use crate::kernel::ServerDeps;

/// Check the code with the provider, load the officer's credential record and
/// issue a session token.
///
/// Steps run in order and stop at the first failure; nothing is persisted.
#[instrument(skip_all, fields(phone = %phone_fingerprint(phone_number)))]
pub async fn verify_otp(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<AuthResponse, AuthError> {
    let approved = deps
        .otp_call(deps.otp.check_otp(phone_number, code))
        .await
        .map_err(AuthError::ProviderUnavailable)?;

    if !approved {
        info!("OTP rejected");
        return Err(AuthError::InvalidCredentials);
    }

    let profile = deps
        .store_call(deps.credentials.find_by_phone_number(phone_number))
        .await?
        .ok_or_else(|| AuthError::UnknownIdentity {
            fingerprint: phone_fingerprint(phone_number),
        })?;

    let token = deps
        .jwt_service
        .create_token(&profile.phone_number)
        .map_err(AuthError::TokenIssue)?;

    info!("OTP verified, session issued");
    Ok(AuthResponse { token, profile })
}
