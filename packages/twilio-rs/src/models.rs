use serde::Deserialize;

/// Verification resource returned when a code is dispatched.
#[derive(Debug, Clone, Deserialize)]
pub struct OTPResponse {
    pub sid: String,
    pub service_sid: String,
    pub to: String,
    pub channel: String,
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

/// Verification check resource returned when a code is submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct OTPVerifyResponse {
    pub status: String,
    #[serde(default)]
    pub valid: bool,
}

impl OTPVerifyResponse {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// Error payload Twilio attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}
