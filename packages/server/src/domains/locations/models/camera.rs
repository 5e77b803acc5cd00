use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A camera feed and the latest crowd reading derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Camera {
    pub id: String,
    pub location_id: String,
    pub crowd_count: i32,
    pub police_intervention_needed: bool,
    pub intervention_suggestions: Vec<String>,
}

impl Camera {
    pub async fn find_by_location(location_id: &str, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM cameras WHERE location_id = $1 ORDER BY id ASC")
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    pub async fn upsert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO cameras (id, location_id, crowd_count, police_intervention_needed, intervention_suggestions)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET location_id = EXCLUDED.location_id,
                crowd_count = EXCLUDED.crowd_count,
                police_intervention_needed = EXCLUDED.police_intervention_needed,
                intervention_suggestions = EXCLUDED.intervention_suggestions
            "#,
        )
        .bind(&self.id)
        .bind(&self.location_id)
        .bind(self.crowd_count)
        .bind(self.police_intervention_needed)
        .bind(&self.intervention_suggestions)
        .execute(pool)
        .await?;
        Ok(())
    }
}
