//! Send OTP action

use tracing::{info, instrument};

use crate::domains::auth::models::phone_fingerprint;
use crate::kernel::{OtpProviderError, ServerDeps};

/// Ask the OTP provider to text a code to the phone number.
///
/// Does not check that the number belongs to a known officer; that happens
/// after verification so the endpoint cannot be used to discover which numbers have records.
#[instrument(skip_all, fields(phone = %phone_fingerprint(phone_number)))]
pub async fn send_otp(phone_number: &str, deps: &ServerDeps) -> Result<(), OtpProviderError> {
    deps.otp_call(deps.otp.send_otp(phone_number)).await?;

    info!("OTP sent");
    Ok(())
}
