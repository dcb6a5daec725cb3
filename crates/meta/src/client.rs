//! Production [`AdsApi`] implementation over the Graph HTTP API.

use async_trait::async_trait;
use serde_json::Value;

use adboard_core::budget::BudgetType;
use adboard_core::model::{Ad, AdAccount, AdSet, Campaign};
use adboard_core::types::{EntityId, EntityKind};

use crate::api::{AdsApi, CampaignDraft, DateRange, InterestMatch};
use crate::error::MetaApiError;
use crate::fields::{
    ACCOUNT_FIELDS, ADSET_FIELDS, AD_FIELDS, API_VERSION, BASE_URL, CAMPAIGN_FIELDS,
};

/// HTTP client for one access token's view of the Marketing API.
pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(format!("{BASE_URL}/{API_VERSION}"), access_token)
    }

    /// Override the endpoint, used by tests pointed at a local server.
    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            access_token,
        }
    }

    /// GET a path with the given query params, returning the parsed body.
    /// Non-2xx responses become [`MetaApiError::Api`] with the raw body.
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, MetaApiError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(params)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// POST form params to a path.
    async fn post(&self, path: &str, params: &[(&str, String)]) -> Result<Value, MetaApiError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .form(params)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, MetaApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetaApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| MetaApiError::InvalidResponse(e.to_string()))
    }

    /// Extract the `data` array every list endpoint wraps its rows in.
    fn data_array(body: &Value) -> Result<&Vec<Value>, MetaApiError> {
        body.get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| MetaApiError::InvalidResponse("missing 'data' array".to_string()))
    }

    fn list_params(fields: &str, range: Option<DateRange>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("fields", fields.to_string()),
            ("limit", "500".to_string()),
        ];
        if let Some(r) = range {
            params.push((
                "time_range",
                format!("{{\"since\":\"{}\",\"until\":\"{}\"}}", r.since, r.until),
            ));
        }
        params
    }

    /// Budgets go over the wire in minor units.
    fn minor_units(amount: f64) -> String {
        format!("{}", (amount * 100.0).round() as i64)
    }

    /// Account path segment, tolerant of an already-prefixed id.
    fn act_path(account_id: &str) -> String {
        format!("act_{}", account_id.trim_start_matches("act_"))
    }
}

#[async_trait]
impl AdsApi for GraphClient {
    async fn fetch_account(&self, account_id: &str) -> Result<AdAccount, MetaApiError> {
        let body = self
            .get(
                &Self::act_path(account_id),
                &[("fields", ACCOUNT_FIELDS.to_string())],
            )
            .await?;
        Ok(AdAccount::from_json(&body))
    }

    async fn fetch_campaigns(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Campaign>, MetaApiError> {
        let body = self
            .get(
                &format!("{}/campaigns", Self::act_path(account_id)),
                &Self::list_params(CAMPAIGN_FIELDS, range),
            )
            .await?;
        Ok(Self::data_array(&body)?
            .iter()
            .map(Campaign::from_json)
            .collect())
    }

    async fn fetch_ad_sets(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<AdSet>, MetaApiError> {
        let body = self
            .get(
                &format!("{}/adsets", Self::act_path(account_id)),
                &Self::list_params(ADSET_FIELDS, range),
            )
            .await?;
        Ok(Self::data_array(&body)?.iter().map(AdSet::from_json).collect())
    }

    async fn fetch_ads(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Ad>, MetaApiError> {
        let body = self
            .get(
                &format!("{}/ads", Self::act_path(account_id)),
                &Self::list_params(AD_FIELDS, range),
            )
            .await?;
        Ok(Self::data_array(&body)?.iter().map(Ad::from_json).collect())
    }

    async fn set_entity_status(
        &self,
        kind: EntityKind,
        id: &EntityId,
        status: &str,
    ) -> Result<(), MetaApiError> {
        self.post(id, &[("status", status.to_string())]).await?;
        tracing::info!(kind = kind.as_str(), id = %id, status, "Entity status updated upstream");
        Ok(())
    }

    async fn set_entity_budget(
        &self,
        kind: EntityKind,
        id: &EntityId,
        budget_type: BudgetType,
        amount: f64,
    ) -> Result<(), MetaApiError> {
        let field = match budget_type {
            BudgetType::Daily => "daily_budget",
            BudgetType::Lifetime => "lifetime_budget",
        };
        self.post(id, &[(field, Self::minor_units(amount))]).await?;
        tracing::info!(
            kind = kind.as_str(),
            id = %id,
            budget_type = budget_type.as_str(),
            amount,
            "Entity budget updated upstream"
        );
        Ok(())
    }

    async fn create_campaign(
        &self,
        account_id: &str,
        draft: &CampaignDraft,
    ) -> Result<EntityId, MetaApiError> {
        let budget_field = match draft.budget_type {
            BudgetType::Daily => "daily_budget",
            BudgetType::Lifetime => "lifetime_budget",
        };

        let mut form = reqwest::multipart::Form::new()
            .text("name", draft.name.clone())
            .text("objective", draft.objective.clone())
            // New campaigns start paused so the user can review delivery.
            .text("status", "PAUSED")
            .text("special_ad_categories", "[]")
            .text(budget_field, Self::minor_units(draft.budget_amount))
            .text("targeting", draft.targeting.to_json().to_string());

        if let Some(media) = &draft.media {
            let part = reqwest::multipart::Part::bytes(media.bytes.clone())
                .file_name(media.filename.clone())
                .mime_str(&media.content_type)
                .map_err(|e| MetaApiError::InvalidResponse(e.to_string()))?;
            form = form.part("source", part);
        }

        let url = format!("{}/{}/campaigns", self.base_url, Self::act_path(account_id));
        let response = self
            .client
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .multipart(form)
            .send()
            .await?;
        let body = Self::read_json(response).await?;

        let id = body
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| MetaApiError::InvalidResponse("missing campaign id".to_string()))?;
        tracing::info!(account_id, campaign_id = id, "Campaign created");
        Ok(id.to_string())
    }

    async fn search_interests(&self, query: &str) -> Result<Vec<InterestMatch>, MetaApiError> {
        let body = self
            .get(
                "search",
                &[
                    ("type", "adinterest".to_string()),
                    ("q", query.to_string()),
                    ("limit", "25".to_string()),
                ],
            )
            .await?;
        Ok(Self::data_array(&body)?
            .iter()
            .filter_map(|v| {
                Some(InterestMatch {
                    id: v.get("id").and_then(Value::as_str)?.to_string(),
                    name: v.get("name").and_then(Value::as_str).unwrap_or("").to_string(),
                    audience_size: v
                        .get("audience_size_upper_bound")
                        .and_then(Value::as_i64)
                        .unwrap_or(0),
                })
            })
            .collect())
    }
}
