//! Campaign creation from the wizard's multipart submission.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use adboard_core::budget::BudgetType;
use adboard_core::targeting::Targeting;
use adboard_core::types::EntityId;
use adboard_meta::{CampaignDraft, MediaUpload};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedCampaign {
    pub id: EntityId,
}

/// POST /accounts/{account_id}/campaigns
///
/// Accept the wizard fields as multipart parts. Text parts carry the
/// draft values, `targeting` is a JSON string, and `media` is an
/// optional creative file.
pub async fn create_campaign(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedCampaign>>)> {
    let mut name: Option<String> = None;
    let mut objective: Option<String> = None;
    let mut budget_type = BudgetType::default();
    let mut budget_amount: Option<f64> = None;
    let mut targeting = Targeting::default();
    let mut media: Option<MediaUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "name" => name = Some(read_text(field).await?),
            "objective" => objective = Some(read_text(field).await?),
            "budget_type" => {
                budget_type = match read_text(field).await?.as_str() {
                    "daily" => BudgetType::Daily,
                    "lifetime" => BudgetType::Lifetime,
                    other => {
                        return Err(AppError::BadRequest(format!(
                            "Unknown budget type: {other}"
                        )))
                    }
                };
            }
            "budget_amount" => {
                let raw = read_text(field).await?;
                budget_amount = Some(adboard_core::budget::parse_amount(&raw).map_err(
                    |e| AppError::Core(adboard_core::error::CoreError::Validation(e)),
                )?);
            }
            "targeting" => {
                let raw = read_text(field).await?;
                let value: serde_json::Value = serde_json::from_str(&raw)
                    .map_err(|e| AppError::BadRequest(format!("Invalid targeting JSON: {e}")))?;
                targeting = Targeting::from_json(&value);
            }
            "media" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                media = Some(MediaUpload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let draft = CampaignDraft {
        name: name.ok_or_else(|| AppError::BadRequest("Missing field: name".to_string()))?,
        objective: objective
            .ok_or_else(|| AppError::BadRequest("Missing field: objective".to_string()))?,
        budget_type,
        budget_amount: budget_amount
            .ok_or_else(|| AppError::BadRequest("Missing field: budget_amount".to_string()))?,
        targeting,
        media,
    };

    let id = state.ads.create_campaign(&account_id, &draft).await?;
    tracing::info!(campaign_id = %id, account_id = %account_id, "Campaign created");

    // Pull a fresh snapshot so the new campaign shows up on the next
    // list. A failure here is not the client's problem; the poller will
    // catch up on its next tick.
    if let Err(e) = state.store.load(state.ads.as_ref()).await {
        tracing::warn!(error = %e, "Post-creation refresh failed");
    }

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedCampaign { id },
        }),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}
