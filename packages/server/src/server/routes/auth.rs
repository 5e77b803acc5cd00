use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, ApiResponse};
use crate::domains::auth::{actions, AuthResponse};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(alias = "identity")]
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(alias = "identity")]
    pub phone_number: String,
    #[serde(alias = "code")]
    pub otp_code: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub phone_number: String,
}

fn required(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// POST /api/v1/auth/send-otp
pub async fn send_otp_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(body) = body?;
    let phone_number = required("phone_number", &body.phone_number)?;

    actions::send_otp(&phone_number, &state.deps).await?;

    Ok(Json(ApiResponse::<()>::message("OTP sent successfully")))
}

/// POST /api/v1/auth/verify-otp
pub async fn verify_otp_handler(
    Extension(state): Extension<AppState>,
    body: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(body) = body?;
    let phone_number = required("phone_number", &body.phone_number)?;
    let otp_code = required("otp_code", &body.otp_code)?;

    let response = actions::verify_otp(&phone_number, &otp_code, &state.deps).await?;
    Ok(Json(response))
}

/// GET /api/v1/auth/me
pub async fn me_handler(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        phone_number: user.phone_number,
    })
}
