//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod postgres_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioAdapter};
pub use postgres_store::PostgresStore;
pub use test_dependencies::{
    InMemoryCredentialStore, InMemoryMonitoringStore, MockOtpService, TestDependencies,
    TEST_JWT_ISSUER, TEST_JWT_SECRET,
};
pub use traits::*;
