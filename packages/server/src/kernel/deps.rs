//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by all domain actions.
//! All external services use trait abstractions to enable testing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use twilio::{TwilioError, TwilioService};

use crate::domains::auth::JwtService;
use crate::kernel::{
    BaseCredentialStore, BaseMonitoringStore, BaseOtpService, OtpProviderError, StoreError,
};

// =============================================================================
// TwilioService Adapter (implements BaseOtpService trait)
// =============================================================================

/// Wrapper around TwilioService that implements BaseOtpService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

fn provider_error(err: TwilioError) -> OtpProviderError {
    match err {
        TwilioError::Api { status, .. } if status.is_client_error() => {
            OtpProviderError::Rejected(err.to_string())
        }
        other => OtpProviderError::Unavailable(other.to_string()),
    }
}

#[async_trait]
impl BaseOtpService for TwilioAdapter {
    async fn send_otp(&self, phone_number: &str) -> Result<(), OtpProviderError> {
        self.0
            .send_otp(phone_number)
            .await
            .map(|_| ())
            .map_err(provider_error)
    }

    async fn check_otp(&self, phone_number: &str, code: &str) -> Result<bool, OtpProviderError> {
        self.0
            .check_otp(phone_number, code)
            .await
            .map_err(provider_error)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions and handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub otp: Arc<dyn BaseOtpService>,
    pub credentials: Arc<dyn BaseCredentialStore>,
    pub monitoring: Arc<dyn BaseMonitoringStore>,
    /// Shared by token issuance (login) and token validation (middleware)
    pub jwt_service: Arc<JwtService>,
    /// Upper bound on each call to the OTP provider or the store
    pub external_call_timeout: Duration,
    /// Sessions for these phone numbers may manage credential records
    pub admin_phone_numbers: Vec<String>,
}

impl ServerDeps {
    pub fn new(
        otp: Arc<dyn BaseOtpService>,
        credentials: Arc<dyn BaseCredentialStore>,
        monitoring: Arc<dyn BaseMonitoringStore>,
        jwt_service: Arc<JwtService>,
        external_call_timeout: Duration,
        admin_phone_numbers: Vec<String>,
    ) -> Self {
        Self {
            otp,
            credentials,
            monitoring,
            jwt_service,
            external_call_timeout,
            admin_phone_numbers,
        }
    }

    pub fn is_admin(&self, phone_number: &str) -> bool {
        self.admin_phone_numbers.iter().any(|admin| admin == phone_number)
    }

    /// Run an OTP provider call under the external call timeout.
    pub async fn otp_call<T, F>(&self, call: F) -> Result<T, OtpProviderError>
    where
        F: Future<Output = Result<T, OtpProviderError>>,
    {
        let limit = self.external_call_timeout;
        tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(OtpProviderError::Timeout(limit)))
    }

    /// Run a store call under the external call timeout.
    pub async fn store_call<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let limit = self.external_call_timeout;
        tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(StoreError::Timeout(limit)))
    }
}
