//! List handlers for the three dashboard tabs.
//!
//! Each endpoint serves from the in-memory snapshot, loading it first
//! when the account has never been fetched or when the client forces a
//! refresh (subject to the cooldown gate). Every row is returned with
//! its resolved status embedded so the frontend never re-derives it.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use adboard_core::model::{Ad, AdAccount, AdSet, Campaign, Snapshot};
use adboard_core::pipeline::{apply_filters, ListEntry};
use adboard_core::refresh::RefreshMode;
use adboard_core::status::{resolve_ad, resolve_ad_set, resolve_campaign, StatusResult};
use adboard_meta::DateRange;

use crate::error::{AppError, AppResult};
use crate::query::ListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load the snapshot if this request requires it.
///
/// Three triggers: a never-loaded account, a date-range change (the old
/// rows belong to the old range), and `refresh=true`. Only the last is
/// cooldown-gated; inside the cooldown a manual refresh degrades to
/// serving the cached snapshot.
async fn ensure_loaded(
    state: &AppState,
    account_id: &str,
    range: Option<DateRange>,
    refresh: bool,
) -> AppResult<()> {
    let range_changed = state.store.watch(account_id, range);

    let forced = refresh && state.store.refresh_mode() == RefreshMode::Forced;
    if forced || range_changed || state.store.needs_load(account_id) {
        state.store.load(state.ads.as_ref()).await?;
    }
    Ok(())
}

/// Account lookup for status resolution: the entity's own account id
/// when known, falling back to the requested account.
fn account_for<'a>(
    accounts: &'a HashMap<String, AdAccount>,
    entity_account: &str,
    requested: &str,
) -> Option<&'a AdAccount> {
    let direct = accounts
        .get(entity_account)
        .or_else(|| accounts.get(entity_account.trim_start_matches("act_")));
    direct.or_else(|| accounts.get(requested))
}

fn belongs_to(entity_account: &str, requested: &str) -> bool {
    // Partial payloads may omit the account id; those rows belong to
    // whichever account was requested. Both sides may carry the
    // platform's `act_` prefix.
    entity_account.is_empty()
        || entity_account.trim_start_matches("act_") == requested.trim_start_matches("act_")
}

/// Serialize an entity with its resolved status embedded.
fn row<E: serde::Serialize>(entity: &E, status: StatusResult) -> Value {
    let mut value = serde_json::to_value(entity).unwrap_or(Value::Null);
    if let Value::Object(obj) = &mut value {
        obj.insert("status_info".into(), serde_json::to_value(status).unwrap_or(Value::Null));
    }
    value
}

fn list_response<E, R>(
    snapshot: &Snapshot,
    entities: Vec<E>,
    params: &ListParams,
    resolve: R,
) -> AppResult<Json<DataResponse<Vec<Value>>>>
where
    E: ListEntry + serde::Serialize,
    R: Fn(&E, &Snapshot) -> StatusResult,
{
    let filter = params.filter().map_err(AppError::BadRequest)?;
    let sort = params.sort_state().map_err(AppError::BadRequest)?;

    let rows = apply_filters(entities, &filter, &sort, |e| resolve(e, snapshot))
        .iter()
        .map(|e| row(e, resolve(e, snapshot)))
        .collect();

    Ok(Json(DataResponse { data: rows }))
}

/// GET /accounts/{account_id}/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let range = params.date_range().map_err(AppError::BadRequest)?;
    ensure_loaded(&state, &account_id, range, params.refresh).await?;

    let snapshot = state.store.read();
    let campaigns: Vec<Campaign> = snapshot
        .campaigns
        .iter()
        .filter(|c| belongs_to(&c.account_id, &account_id))
        .cloned()
        .collect();

    list_response(&snapshot, campaigns, &params, |c: &Campaign, snap| {
        resolve_campaign(c, account_for(&snap.accounts, &c.account_id, &account_id))
    })
}

/// GET /accounts/{account_id}/adsets
pub async fn list_ad_sets(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let range = params.date_range().map_err(AppError::BadRequest)?;
    ensure_loaded(&state, &account_id, range, params.refresh).await?;

    let snapshot = state.store.read();
    let ad_sets: Vec<AdSet> = snapshot
        .ad_sets
        .iter()
        .filter(|s| belongs_to(&s.account_id, &account_id))
        .cloned()
        .collect();

    list_response(&snapshot, ad_sets, &params, |s: &AdSet, snap| {
        resolve_ad_set(s, account_for(&snap.accounts, &s.account_id, &account_id))
    })
}

/// GET /accounts/{account_id}/ads
pub async fn list_ads(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let range = params.date_range().map_err(AppError::BadRequest)?;
    ensure_loaded(&state, &account_id, range, params.refresh).await?;

    let snapshot = state.store.read();
    let ads: Vec<Ad> = snapshot
        .ads
        .iter()
        .filter(|a| belongs_to(&a.account_id, &account_id))
        .cloned()
        .collect();

    list_response(&snapshot, ads, &params, |a: &Ad, snap| {
        resolve_ad(a, account_for(&snap.accounts, &a.account_id, &account_id))
    })
}
