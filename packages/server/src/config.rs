use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Smallest HMAC secret accepted for session tokens (256 bits).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_verify_service_sid: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub external_call_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub rate_limit_enabled: bool,
    /// Phone numbers allowed to manage credential records
    pub admin_phone_numbers: Vec<String>,
    /// Override for the Twilio Verify host (regional edge or local stub)
    pub twilio_verify_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, test maps).
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{} must be set", key))
        };

        let jwt_secret = required("JWT_SECRET")?;
        ensure!(
            jwt_secret.len() >= MIN_JWT_SECRET_LEN,
            "JWT_SECRET must be at least {} bytes",
            MIN_JWT_SECRET_LEN
        );

        let timeout_secs: u64 = lookup("EXTERNAL_CALL_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("EXTERNAL_CALL_TIMEOUT_SECS must be a whole number of seconds")?;
        ensure!(timeout_secs > 0, "EXTERNAL_CALL_TIMEOUT_SECS must be positive");

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            twilio_verify_service_sid: required("TWILIO_VERIFY_SERVICE_SID")?,
            jwt_secret,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "crowd-monitor".to_string()),
            external_call_timeout: Duration::from_secs(timeout_secs),
            allowed_origins: split_list(lookup("ALLOWED_ORIGINS")),
            rate_limit_enabled: lookup("RATE_LIMIT_ENABLED")
                .map(|v| v.parse::<bool>().unwrap_or(true))
                .unwrap_or(true),
            admin_phone_numbers: split_list(lookup("ADMIN_PHONE_NUMBERS")),
            twilio_verify_base_url: lookup("TWILIO_VERIFY_BASE_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }
}

/// Comma-separated list, blanks dropped
fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
