pub mod health;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /accounts/{account_id}/campaigns   list (GET), create from wizard (POST)
/// /accounts/{account_id}/adsets      list (GET)
/// /accounts/{account_id}/ads         list (GET)
///
/// /{kind}/{id}/status                optimistic status toggle (POST)
/// /{kind}/{id}/budget                optimistic budget patch (PATCH)
///
/// /interests                         targeting interest search (GET)
///
/// /preferences/{user_key}            UI preference blob (GET, PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{account_id}/campaigns",
            get(handlers::entities::list_campaigns).post(handlers::creation::create_campaign),
        )
        .route(
            "/accounts/{account_id}/adsets",
            get(handlers::entities::list_ad_sets),
        )
        .route(
            "/accounts/{account_id}/ads",
            get(handlers::entities::list_ads),
        )
        .route("/{kind}/{id}/status", post(handlers::mutations::set_status))
        .route("/{kind}/{id}/budget", patch(handlers::mutations::set_budget))
        .route("/interests", get(handlers::interests::search_interests))
        .route(
            "/preferences/{user_key}",
            get(handlers::preferences::get_preferences).put(handlers::preferences::put_preferences),
        )
}
