//! Repository for the `ui_preferences` table.

use sqlx::PgPool;

use crate::models::preference::{UiPreference, UpsertPreference};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_key, payload, updated_at";

/// Get/upsert operations for per-user UI preference blobs.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Find the preference blob for a user key.
    pub async fn find_by_user_key(
        pool: &PgPool,
        user_key: &str,
    ) -> Result<Option<UiPreference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ui_preferences WHERE user_key = $1");
        sqlx::query_as::<_, UiPreference>(&query)
            .bind(user_key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the preference blob for a user key.
    pub async fn upsert(
        pool: &PgPool,
        user_key: &str,
        input: &UpsertPreference,
    ) -> Result<UiPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO ui_preferences (user_key, payload, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (user_key)
             DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UiPreference>(&query)
            .bind(user_key)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }
}
