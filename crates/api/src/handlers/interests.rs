//! Interest search for the targeting step.
//!
//! Requests race: a user typing quickly fires several searches and only
//! the newest one may populate the cache. Each request takes a
//! generation number before calling upstream; results from an older
//! generation are discarded.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use adboard_meta::InterestMatch;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterestParams {
    pub q: String,
}

/// GET /interests?q=
pub async fn search_interests(
    State(state): State<AppState>,
    Query(params): Query<InterestParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query must not be empty".to_string()));
    }

    let generation = state.store.begin_interest_search();
    let results: Vec<InterestMatch> = state.ads.search_interests(query).await?;
    state.store.complete_interest_search(generation, results);

    Ok(Json(DataResponse {
        data: state.store.interest_results(),
    }))
}
