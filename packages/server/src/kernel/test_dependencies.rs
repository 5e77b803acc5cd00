// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    BaseCredentialStore, BaseMonitoringStore, BaseOtpService, OtpProviderError, ServerDeps,
    StoreError,
};
use crate::domains::auth::models::UserProfile;
use crate::domains::auth::JwtService;
use crate::domains::locations::models::{Camera, Location};
use crate::domains::video_analysis::models::{VideoAnalysis, VideoAnalysisDocument};

/// Signing secret used by `TestDependencies::server_deps`
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-crowd-monitor-tests";
pub const TEST_JWT_ISSUER: &str = "crowd-monitor-test";

// =============================================================================
// Mock OTP Service
// =============================================================================

/// OTP provider double: approves exactly the codes registered with `set_code`.
pub struct MockOtpService {
    codes: Arc<Mutex<HashMap<String, String>>>,
    sent: Arc<Mutex<Vec<String>>>,
    checks: Arc<Mutex<Vec<(String, String)>>>,
    unavailable: Arc<Mutex<bool>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl MockOtpService {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            checks: Arc::new(Mutex::new(Vec::new())),
            unavailable: Arc::new(Mutex::new(false)),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_code(self, phone_number: &str, code: &str) -> Self {
        self.set_code(phone_number, code);
        self
    }

    pub fn set_code(&self, phone_number: &str, code: &str) {
        self.codes
            .lock()
            .unwrap()
            .insert(phone_number.to_string(), code.to_string());
    }

    /// Make every call fail as if the provider were down
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Sleep before answering, for timeout tests
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Phone numbers a code was sent to
    pub fn sent_to(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// (phone_number, code) pairs that were checked
    pub fn checks(&self) -> Vec<(String, String)> {
        self.checks.lock().unwrap().clone()
    }

    async fn before_call(&self) -> Result<(), OtpProviderError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.unavailable.lock().unwrap() {
            return Err(OtpProviderError::Unavailable("mock provider down".to_string()));
        }
        Ok(())
    }
}

impl Default for MockOtpService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOtpService for MockOtpService {
    async fn send_otp(&self, phone_number: &str) -> Result<(), OtpProviderError> {
        self.before_call().await?;
        self.sent.lock().unwrap().push(phone_number.to_string());
        Ok(())
    }

    async fn check_otp(&self, phone_number: &str, code: &str) -> Result<bool, OtpProviderError> {
        self.before_call().await?;
        self.checks
            .lock()
            .unwrap()
            .push((phone_number.to_string(), code.to_string()));

        let codes = self.codes.lock().unwrap();
        Ok(codes.get(phone_number).map(|c| c == code).unwrap_or(false))
    }
}

// =============================================================================
// In-memory Credential Store
// =============================================================================

pub struct InMemoryCredentialStore {
    users: Arc<Mutex<Vec<UserProfile>>>,
    failure: Arc<Mutex<Option<String>>>,
    lookups: Arc<Mutex<usize>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            lookups: Arc::new(Mutex::new(0)),
        }
    }

    pub fn insert(&self, user: UserProfile) {
        let mut users = self.users.lock().unwrap();
        users.retain(|u| u.phone_number != user.phone_number);
        users.push(user);
    }

    /// Make every call fail with `StoreError::Unavailable`
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Number of phone number lookups served
    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCredentialStore for InMemoryCredentialStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<UserProfile>, StoreError> {
        self.check_failure()?;
        *self.lookups.lock().unwrap() += 1;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn save(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.check_failure()?;
        self.insert(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserProfile>, StoreError> {
        self.check_failure()?;
        Ok(self.users.lock().unwrap().clone())
    }
}

// =============================================================================
// In-memory Monitoring Store
// =============================================================================

pub struct InMemoryMonitoringStore {
    locations: Arc<Mutex<Vec<Location>>>,
    cameras: Arc<Mutex<Vec<Camera>>>,
    documents: Arc<Mutex<Vec<VideoAnalysisDocument>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl InMemoryMonitoringStore {
    pub fn new() -> Self {
        Self {
            locations: Arc::new(Mutex::new(Vec::new())),
            cameras: Arc::new(Mutex::new(Vec::new())),
            documents: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn add_location(&self, location: Location) {
        self.locations.lock().unwrap().push(location);
    }

    pub fn add_camera(&self, camera: Camera) {
        self.cameras.lock().unwrap().push(camera);
    }

    pub fn add_video_analysis(&self, analysis: &VideoAnalysis) {
        let document = VideoAnalysisDocument::from_analysis(analysis)
            .expect("video analysis serializes to JSON");
        self.documents.lock().unwrap().push(document);
    }

    /// Store a document as-is, without checking its shape
    pub fn add_raw_document(&self, video_id: &str, document: serde_json::Value) {
        self.documents.lock().unwrap().push(VideoAnalysisDocument {
            video_id: video_id.to_string(),
            document,
        });
    }

    /// Make every call fail with `StoreError::Unavailable`
    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock().unwrap() = Some(reason.to_string());
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryMonitoringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMonitoringStore for InMemoryMonitoringStore {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        self.check_failure()?;
        Ok(self.locations.lock().unwrap().clone())
    }

    async fn cameras_for_location(&self, location_id: &str) -> Result<Vec<Camera>, StoreError> {
        self.check_failure()?;
        Ok(self
            .cameras
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn list_video_analyses(&self) -> Result<Vec<VideoAnalysisDocument>, StoreError> {
        self.check_failure()?;
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find_video_analysis(
        &self,
        video_id: &str,
    ) -> Result<Option<VideoAnalysisDocument>, StoreError> {
        self.check_failure()?;
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.video_id == video_id)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_failure()
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of doubles; keep it around to arrange and inspect state.
pub struct TestDependencies {
    pub otp: Arc<MockOtpService>,
    pub credentials: Arc<InMemoryCredentialStore>,
    pub monitoring: Arc<InMemoryMonitoringStore>,
    pub jwt_service: Arc<JwtService>,
    pub external_call_timeout: Duration,
    pub admin_phone_numbers: Vec<String>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            otp: Arc::new(MockOtpService::new()),
            credentials: Arc::new(InMemoryCredentialStore::new()),
            monitoring: Arc::new(InMemoryMonitoringStore::new()),
            jwt_service: Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())),
            external_call_timeout: Duration::from_secs(10),
            admin_phone_numbers: Vec::new(),
        }
    }

    pub fn with_otp(mut self, otp: MockOtpService) -> Self {
        self.otp = Arc::new(otp);
        self
    }

    pub fn with_admin(mut self, phone_number: &str) -> Self {
        self.admin_phone_numbers.push(phone_number.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.external_call_timeout = timeout;
        self
    }

    /// ServerDeps sharing this bundle's doubles
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.otp.clone(),
            self.credentials.clone(),
            self.monitoring.clone(),
            self.jwt_service.clone(),
            self.external_call_timeout,
            self.admin_phone_numbers.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
