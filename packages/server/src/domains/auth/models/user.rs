use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

/// Credential record for a field officer, keyed by phone number.
///
/// Created out-of-band (seeding or the admin endpoint) and only read during login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub phone_number: String,
    pub name: String,
    pub rank: String,
    pub department: String,
    pub id_card_number: String,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl UserProfile {
    /// Find a user by phone number
    pub async fn find_by_phone_number(phone_number: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM users ORDER BY created_at ASC, phone_number ASC")
            .fetch_all(pool)
            .await
    }

    /// Insert the user, replacing any record with the same phone number
    pub async fn upsert(&self, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (phone_number, name, rank, department, id_card_number)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (phone_number) DO UPDATE
            SET name = EXCLUDED.name,
                rank = EXCLUDED.rank,
                department = EXCLUDED.department,
                id_card_number = EXCLUDED.id_card_number
            "#,
        )
        .bind(&self.phone_number)
        .bind(&self.name)
        .bind(&self.rank)
        .bind(&self.department)
        .bind(&self.id_card_number)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Reject records that cannot serve as a login key
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.phone_number.trim().is_empty(),
            "phone_number is required"
        );
        anyhow::ensure!(!self.name.trim().is_empty(), "name is required");
        Ok(())
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Short SHA256 fingerprint of a phone number for log lines.
///
/// Raw phone numbers never go to the logs.
pub fn phone_fingerprint(phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone_number.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn officer() -> UserProfile {
        UserProfile {
            phone_number: "+919175045787".to_string(),
            name: "Rajesh Kumar".to_string(),
            rank: "ASI".to_string(),
            department: "Madgaon Police Department".to_string(),
            id_card_number: "123".to_string(),
        }
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = phone_fingerprint("+910000000000");
        let b = phone_fingerprint("+910000000000");
        assert_eq!(a, b, "Same phone should produce same fingerprint");
    }

    #[test]
    fn test_fingerprint_hides_number() {
        let fp = phone_fingerprint("+910000000000");
        assert_eq!(fp.len(), 12);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!fp.contains("910000000000"));
        assert_ne!(fp, phone_fingerprint("+919999999999"));
    }

    #[test]
    fn test_validate() {
        assert!(officer().validate().is_ok());

        let mut missing_phone = officer();
        missing_phone.phone_number = "  ".to_string();
        assert!(missing_phone.validate().is_err());

        let mut missing_name = officer();
        missing_name.name = String::new();
        assert!(missing_name.validate().is_err());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(officer()).unwrap();
        assert_eq!(json["phone_number"], "+919175045787");
        assert_eq!(json["id_card_number"], "123");
    }
}
