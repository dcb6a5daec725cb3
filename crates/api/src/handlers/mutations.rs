//! Optimistic mutations: status toggles and budget edits.
//!
//! The snapshot is updated before the upstream call so the next read
//! already reflects the change. If the upstream call fails, the inverse
//! command produced by the optimistic apply rolls the snapshot back and
//! the error propagates to the client.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use adboard_core::budget::{parse_amount, BudgetType};
use adboard_core::command::Command;
use adboard_core::error::CoreError;
use adboard_core::types::EntityKind;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SetBudgetBody {
    pub budget_type: BudgetType,
    /// Raw input string, validated server-side like any other client.
    pub amount: String,
}

fn parse_kind(kind: &str) -> AppResult<EntityKind> {
    EntityKind::from_str_value(kind).map_err(AppError::BadRequest)
}

/// POST /{kind}/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<SetStatusBody>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    if body.status != "ACTIVE" && body.status != "PAUSED" {
        return Err(AppError::BadRequest(format!(
            "Status must be ACTIVE or PAUSED, got: {}",
            body.status
        )));
    }

    let cmd = Command::SetStatus {
        kind,
        id: id.clone(),
        status: body.status.clone(),
    };
    let inverse = state
        .store
        .apply(&cmd)
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: kind.as_str(),
            id: id.clone(),
        }))?;

    if let Err(e) = state.ads.set_entity_status(kind, &id, &body.status).await {
        state.store.apply(&inverse);
        return Err(e.into());
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": body.status }),
    }))
}

/// PATCH /{kind}/{id}/budget
pub async fn set_budget(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<SetBudgetBody>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let amount = parse_amount(&body.amount).map_err(CoreError::Validation)?;

    let cmd = Command::SetBudget {
        kind,
        id: id.clone(),
        budget_type: body.budget_type,
        amount,
    };
    let inverse = state
        .store
        .apply(&cmd)
        .ok_or_else(|| AppError::Core(CoreError::NotFound {
            entity: kind.as_str(),
            id: id.clone(),
        }))?;

    if let Err(e) = state
        .ads
        .set_entity_budget(kind, &id, body.budget_type, amount)
        .await
    {
        state.store.apply(&inverse);
        return Err(e.into());
    }

    Ok((
        StatusCode::OK,
        Json(DataResponse {
            data: serde_json::json!({
                "id": id,
                "budget_type": body.budget_type.as_str(),
                "amount": amount,
            }),
        }),
    ))
}
