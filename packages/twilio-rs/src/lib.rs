//! Minimal Twilio Verify client: dispatch a one-time code and check a submitted one.

use std::time::Duration;

pub mod models;
use reqwest::Client;
pub use reqwest::StatusCode;

use crate::models::{OTPResponse, OTPVerifyResponse, TwilioErrorBody};

const VERIFY_BASE_URL: &str = "https://verify.twilio.com/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    #[error("missing Twilio credentials")]
    MissingCredentials,

    #[error("request to Twilio failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Twilio returned {status}: {message}")]
    Api {
        status: StatusCode,
        code: Option<u32>,
        message: String,
    },

    #[error("failed to decode Twilio response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
    base_url: String,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Result<Self, TwilioError> {
        if options.account_sid.is_empty()
            || options.auth_token.is_empty()
            || options.service_id.is_empty()
        {
            return Err(TwilioError::MissingCredentials);
        }

        let client = Client::builder()
            .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        Ok(Self {
            options,
            client,
            base_url: VERIFY_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different Verify host (local stubs, regional edges).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn verifications_url(&self) -> String {
        format!(
            "{base}/Services/{serv_id}/Verifications",
            base = self.base_url,
            serv_id = self.options.service_id
        )
    }

    fn verification_check_url(&self) -> String {
        format!(
            "{base}/Services/{serv_id}/VerificationCheck",
            base = self.base_url,
            serv_id = self.options.service_id
        )
    }

    /// Ask Twilio to send a verification code over SMS.
    pub async fn send_otp(&self, recipient: &str) -> Result<OTPResponse, TwilioError> {
        let form_body = [("To", recipient), ("Channel", "sms")];

        let response = self
            .client
            .post(self.verifications_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response.text().await.unwrap_or_default()));
        }

        response
            .json::<OTPResponse>()
            .await
            .map_err(|e| TwilioError::Decode(e.to_string()))
    }

    /// Check a submitted code.
    ///
    /// `Ok(false)` means Twilio rejected the code, or no verification is pending
    /// for the recipient (expired or already consumed, reported by Twilio as 404).
    /// `Err` is reserved for transport failures and unexpected API errors.
    pub async fn check_otp(&self, recipient: &str, code: &str) -> Result<bool, TwilioError> {
        let form_body = [("To", recipient), ("Code", code)];

        let response = self
            .client
            .post(self.verification_check_url())
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        interpret_check(status, &body)
    }
}

fn api_error(status: StatusCode, body: String) -> TwilioError {
    match serde_json::from_str::<TwilioErrorBody>(&body) {
        Ok(parsed) => TwilioError::Api {
            status,
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => TwilioError::Api {
            status,
            code: None,
            message: body,
        },
    }
}

fn interpret_check(status: StatusCode, body: &str) -> Result<bool, TwilioError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(false);
    }
    if !status.is_success() {
        return Err(api_error(status, body.to_string()));
    }

    let parsed: OTPVerifyResponse =
        serde_json::from_str(body).map_err(|e| TwilioError::Decode(e.to_string()))?;
    Ok(parsed.is_approved())
}
