//! The ads-platform seam.
//!
//! [`AdsApi`] is the trait the service talks to; the production
//! implementation is [`crate::GraphClient`], and integration tests
//! substitute an in-memory stub.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use adboard_core::budget::BudgetType;
use adboard_core::model::{Ad, AdAccount, AdSet, Campaign};
use adboard_core::targeting::Targeting;
use adboard_core::types::{EntityId, EntityKind};

use crate::error::MetaApiError;

/// Inclusive reporting date range for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

/// An uploaded creative file attached to a campaign draft.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything the creation wizard collects before submit.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub name: String,
    pub objective: String,
    pub budget_type: BudgetType,
    /// Decimal currency units; converted to minor units on the wire.
    pub budget_amount: f64,
    pub targeting: Targeting,
    pub media: Option<MediaUpload>,
}

/// One interest-search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestMatch {
    pub id: String,
    pub name: String,
    pub audience_size: i64,
}

/// Operations the dashboard performs against the ads platform.
#[async_trait]
pub trait AdsApi: Send + Sync {
    async fn fetch_account(&self, account_id: &str) -> Result<AdAccount, MetaApiError>;

    async fn fetch_campaigns(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Campaign>, MetaApiError>;

    async fn fetch_ad_sets(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<AdSet>, MetaApiError>;

    async fn fetch_ads(
        &self,
        account_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<Ad>, MetaApiError>;

    /// Toggle an entity's configured status (`ACTIVE` / `PAUSED`).
    async fn set_entity_status(
        &self,
        kind: EntityKind,
        id: &EntityId,
        status: &str,
    ) -> Result<(), MetaApiError>;

    /// Patch an entity's budget. `amount` is in decimal currency units.
    async fn set_entity_budget(
        &self,
        kind: EntityKind,
        id: &EntityId,
        budget_type: BudgetType,
        amount: f64,
    ) -> Result<(), MetaApiError>;

    /// Create a campaign from a wizard draft, returning the new id.
    async fn create_campaign(
        &self,
        account_id: &str,
        draft: &CampaignDraft,
    ) -> Result<EntityId, MetaApiError>;

    /// Search targetable interests by name prefix.
    async fn search_interests(&self, query: &str) -> Result<Vec<InterestMatch>, MetaApiError>;
}
