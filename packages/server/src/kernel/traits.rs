// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (login, nearby filtering) lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseOtpService, BaseCredentialStore)

use std::time::Duration;

use async_trait::async_trait;

use crate::domains::auth::models::UserProfile;
use crate::domains::locations::models::{Camera, Location};
use crate::domains::video_analysis::models::VideoAnalysisDocument;

// =============================================================================
// Errors
// =============================================================================

/// Failure talking to the OTP provider. A wrong code is not an error.
#[derive(Debug, thiserror::Error)]
pub enum OtpProviderError {
    #[error("OTP provider unavailable: {0}")]
    Unavailable(String),

    #[error("OTP provider rejected the request: {0}")]
    Rejected(String),

    #[error("OTP provider did not answer within {0:?}")]
    Timeout(Duration),
}

/// Failure reading or writing the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document {id} does not match the expected shape: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document store did not answer within {0:?}")]
    Timeout(Duration),
}

// =============================================================================
// OTP Service Trait (Infrastructure - SMS verification)
// =============================================================================

#[async_trait]
pub trait BaseOtpService: Send + Sync {
    /// Ask the provider to send a one-time code to the phone number
    async fn send_otp(&self, phone_number: &str) -> Result<(), OtpProviderError>;

    /// Check a submitted code. `Ok(false)` means wrong or expired code.
    async fn check_otp(&self, phone_number: &str, code: &str) -> Result<bool, OtpProviderError>;
}

// =============================================================================
// Credential Store Trait (Infrastructure - user profiles keyed by phone number)
// =============================================================================

#[async_trait]
pub trait BaseCredentialStore: Send + Sync {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<UserProfile>, StoreError>;

    /// Insert or replace the record keyed by its phone number
    async fn save(&self, user: &UserProfile) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<UserProfile>, StoreError>;
}

// =============================================================================
// Monitoring Store Trait (Infrastructure - locations, cameras, analyses)
// =============================================================================

#[async_trait]
pub trait BaseMonitoringStore: Send + Sync {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError>;

    async fn cameras_for_location(&self, location_id: &str) -> Result<Vec<Camera>, StoreError>;

    /// All video-analysis documents, in storage order, undecoded
    async fn list_video_analyses(&self) -> Result<Vec<VideoAnalysisDocument>, StoreError>;

    async fn find_video_analysis(
        &self,
        video_id: &str,
    ) -> Result<Option<VideoAnalysisDocument>, StoreError>;

    /// Cheap liveness check for the health route
    async fn ping(&self) -> Result<(), StoreError>;
}
