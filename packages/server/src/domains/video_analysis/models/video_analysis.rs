use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::utils::{Coordinates, Located};
use crate::kernel::StoreError;

/// Where (and when) a video was captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Crowd assessment produced by the analysis pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub crowd_count: String,
    pub crowd_level: String,
    pub crowd_present: String,
    pub is_peak_hour: String,
    pub police_intervention_required: String,
    pub police_intervention_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub video_id: String,
    pub video_duration: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub location: GeoPoint,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub frame_urls: Vec<String>,
}

impl Located for VideoAnalysis {
    fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.location.latitude, self.location.longitude)
    }
}

/// A stored analysis before schema validation
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAnalysisDocument {
    pub video_id: String,
    pub document: serde_json::Value,
}

impl VideoAnalysisDocument {
    pub fn from_analysis(analysis: &VideoAnalysis) -> Result<Self, serde_json::Error> {
        Ok(Self {
            video_id: analysis.video_id.clone(),
            document: serde_json::to_value(analysis)?,
        })
    }
}

impl TryFrom<VideoAnalysisDocument> for VideoAnalysis {
    type Error = StoreError;

    fn try_from(doc: VideoAnalysisDocument) -> Result<Self, Self::Error> {
        serde_json::from_value(doc.document).map_err(|source| StoreError::Decode {
            id: doc.video_id,
            source,
        })
    }
}

#[derive(sqlx::FromRow)]
struct VideoAnalysisRow {
    video_id: String,
    document: Json<serde_json::Value>,
}

impl From<VideoAnalysisRow> for VideoAnalysisDocument {
    fn from(row: VideoAnalysisRow) -> Self {
        Self {
            video_id: row.video_id,
            document: row.document.0,
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl VideoAnalysisDocument {
    /// All documents in insertion order
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, VideoAnalysisRow>(
            "SELECT video_id, document FROM video_analyses ORDER BY inserted_at ASC, video_id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(video_id: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, VideoAnalysisRow>(
            "SELECT video_id, document FROM video_analyses WHERE video_id = $1",
        )
        .bind(video_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn upsert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO video_analyses (video_id, document)
            VALUES ($1, $2)
            ON CONFLICT (video_id) DO UPDATE SET document = EXCLUDED.document
            "#,
        )
        .bind(&self.video_id)
        .bind(Json(&self.document))
        .execute(pool)
        .await?;
        Ok(())
    }
}
