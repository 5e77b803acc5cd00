use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::Camera;

/// A monitored site (beach, temple, market) and the cameras assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub is_overcrowded: bool,
    pub camera_ids: Vec<String>,
}

/// Location as served to clients, with its cameras inlined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationOverview {
    pub id: String,
    pub name: String,
    pub is_overcrowded: bool,
    pub cameras: Vec<Camera>,
    pub intervention_suggestions: Vec<String>,
}

impl LocationOverview {
    /// Suggestions are shared by every camera at a site, so the first camera's list is used.
    pub fn new(location: Location, cameras: Vec<Camera>) -> Self {
        let intervention_suggestions = cameras
            .first()
            .map(|camera| camera.intervention_suggestions.clone())
            .unwrap_or_default();

        Self {
            id: location.id,
            name: location.name,
            is_overcrowded: location.is_overcrowded,
            cameras,
            intervention_suggestions,
        }
    }
}

impl Location {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM locations ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    pub async fn upsert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO locations (id, name, is_overcrowded, camera_ids)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                is_overcrowded = EXCLUDED.is_overcrowded,
                camera_ids = EXCLUDED.camera_ids
            "#,
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(self.is_overcrowded)
        .bind(&self.camera_ids)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(id: &str, suggestions: &[&str]) -> Camera {
        Camera {
            id: id.to_string(),
            location_id: "loc1".to_string(),
            crowd_count: 120,
            police_intervention_needed: true,
            intervention_suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn miramar() -> Location {
        Location {
            id: "loc1".to_string(),
            name: "Miramar Beach".to_string(),
            is_overcrowded: true,
            camera_ids: vec!["cam1".to_string(), "cam2".to_string()],
        }
    }

    #[test]
    fn test_overview_uses_first_camera_suggestions() {
        let overview = LocationOverview::new(
            miramar(),
            vec![
                camera("cam1", &["Open exit routes"]),
                camera("cam2", &["Something else"]),
            ],
        );
        assert_eq!(overview.intervention_suggestions, vec!["Open exit routes"]);
        assert_eq!(overview.cameras.len(), 2);
    }

    #[test]
    fn test_overview_without_cameras_has_empty_arrays() {
        let overview = LocationOverview::new(miramar(), Vec::new());
        let json = serde_json::to_value(&overview).unwrap();
        assert_eq!(json["cameras"], serde_json::json!([]));
        assert_eq!(json["intervention_suggestions"], serde_json::json!([]));
    }
}
