//! UI preference model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use adboard_core::types::Timestamp;

/// A row from the `ui_preferences` table.
///
/// The payload is an opaque JSON blob owned by the frontend (selected
/// accounts, visible columns, active tab, date range); the service only
/// stores and returns it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UiPreference {
    pub user_key: String,
    pub payload: serde_json::Value,
    pub updated_at: Timestamp,
}

/// DTO for upserting a preference blob.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPreference {
    pub payload: serde_json::Value,
}
