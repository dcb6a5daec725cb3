//! Per-user UI preference blobs (pinned columns, saved filters, theme).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use adboard_core::error::CoreError;
use adboard_db::models::preference::UpsertPreference;
use adboard_db::repositories::PreferenceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /preferences/{user_key}
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let preference = PreferenceRepo::find_by_user_key(&state.pool, &user_key)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "preference",
            id: user_key,
        }))?;

    Ok(Json(DataResponse { data: preference }))
}

/// PUT /preferences/{user_key}
pub async fn put_preferences(
    State(state): State<AppState>,
    Path(user_key): Path<String>,
    Json(input): Json<UpsertPreference>,
) -> AppResult<impl IntoResponse> {
    let preference = PreferenceRepo::upsert(&state.pool, &user_key, &input).await?;
    Ok(Json(DataResponse { data: preference }))
}
