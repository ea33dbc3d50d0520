//! User repository for database operations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Biometric profile columns of a user record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfileRecord {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub sex: Option<String>,
    pub goal: String,
    pub activity_level: String,
    pub updated_at: DateTime<Utc>,
}

/// User repository for database operations
///
/// Read-only: profiles are maintained by the account endpoints.
pub struct UserRepository;

impl UserRepository {
    /// Find a user's biometric profile by ID
    pub async fn find_profile(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<UserProfileRecord>, sqlx::Error> {
        let profile = sqlx::query_as::<_, UserProfileRecord>(
            r#"
            SELECT id, email, first_name, last_name, age, weight, height, sex,
                   goal, activity_level, updated_at
            FROM users
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }
}
