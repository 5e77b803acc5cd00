//! Postgres-backed implementation of the store traits.
//!
//! The SQL itself lives next to each model; this adapter only maps errors.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseCredentialStore, BaseMonitoringStore, StoreError};
use crate::domains::auth::models::UserProfile;
use crate::domains::locations::models::{Camera, Location};
use crate::domains::video_analysis::models::VideoAnalysisDocument;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseCredentialStore for PostgresStore {
    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<UserProfile>, StoreError> {
        Ok(UserProfile::find_by_phone_number(phone_number, &self.pool).await?)
    }

    async fn save(&self, user: &UserProfile) -> Result<(), StoreError> {
        Ok(user.upsert(&self.pool).await?)
    }

    async fn list(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(UserProfile::find_all(&self.pool).await?)
    }
}

#[async_trait]
impl BaseMonitoringStore for PostgresStore {
    async fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(Location::find_all(&self.pool).await?)
    }

    async fn cameras_for_location(&self, location_id: &str) -> Result<Vec<Camera>, StoreError> {
        Ok(Camera::find_by_location(location_id, &self.pool).await?)
    }

    async fn list_video_analyses(&self) -> Result<Vec<VideoAnalysisDocument>, StoreError> {
        Ok(VideoAnalysisDocument::find_all(&self.pool).await?)
    }

    async fn find_video_analysis(
        &self,
        video_id: &str,
    ) -> Result<Option<VideoAnalysisDocument>, StoreError> {
        Ok(VideoAnalysisDocument::find_by_id(video_id, &self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
