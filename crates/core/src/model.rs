//! Read-only projections of the ads platform's entities.
//!
//! These are snapshots received from the Graph API; this system does not
//! own their lifecycle. Each data-load cycle replaces the previous
//! collections wholesale -- there is no incremental merge. The `from_json`
//! constructors are deliberately tolerant: absent or malformed optional
//! fields degrade to zero / empty ("no override") rather than failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::budget::BudgetType;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// An ad account summary.
///
/// `account_status` is the platform's numeric code (1 = active, 2 =
/// disabled, 3 = unsettled, 9 = in grace period, 101 = closed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: EntityId,
    pub name: String,
    pub currency: String,
    pub account_status: i64,
    pub disable_reason: i64,
    /// Spend ceiling in currency units; 0 means no cap.
    pub spend_cap: f64,
    pub amount_spent: f64,
}

/// Status-only projection of an ad embedded in a parent's child list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSummary {
    pub effective_status: String,
}

/// Status-only projection of an ad set embedded in a campaign, carrying
/// its own child ads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSetSummary {
    pub effective_status: String,
    pub ads: Vec<AdSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
    pub id: EntityId,
    pub name: String,
    pub status: String,
    pub effective_status: String,
    pub configured_status: String,
    pub account_id: EntityId,
    pub spend_cap: f64,
    pub amount_spent: f64,
    pub daily_budget: f64,
    pub lifetime_budget: f64,
    pub ad_sets: Vec<AdSetSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdSet {
    pub id: EntityId,
    pub name: String,
    pub status: String,
    pub effective_status: String,
    pub configured_status: String,
    pub campaign_id: EntityId,
    pub account_id: EntityId,
    pub daily_budget: f64,
    pub lifetime_budget: f64,
    pub ads: Vec<AdSummary>,
}

/// Where an ad's budget is configured (ads never hold their own).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSource {
    Campaign,
    #[default]
    AdSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ad {
    pub id: EntityId,
    pub name: String,
    /// Creative headline, searched alongside the name.
    pub title: String,
    /// Creative body text, searched alongside the name.
    pub body: String,
    pub status: String,
    pub effective_status: String,
    pub configured_status: String,
    pub adset_id: EntityId,
    pub campaign_id: EntityId,
    pub account_id: EntityId,
    pub daily_budget: f64,
    pub lifetime_budget: f64,
    pub budget_source: BudgetSource,
    pub budget_type: BudgetType,
}

/// The in-memory collection of everything the dashboard shows.
///
/// Replaced wholesale on each data-load cycle; mutated only by optimistic
/// commands (see [`crate::command`]) between cycles.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub accounts: HashMap<EntityId, AdAccount>,
    pub campaigns: Vec<Campaign>,
    pub ad_sets: Vec<AdSet>,
    pub ads: Vec<Ad>,
    pub loaded_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Tolerant JSON extraction
// ---------------------------------------------------------------------------

/// Extract a string field, defaulting to empty.
fn text(v: &Value, key: &str) -> String {
    v.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

/// Extract an integer field, accepting numbers or numeric strings.
fn integer(v: &Value, key: &str) -> i64 {
    match v.get(key) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Extract a monetary field in currency units.
///
/// The Graph API reports money as strings in minor units (cents); plain
/// numbers are accepted too. Missing or malformed values mean "no value"
/// and collapse to 0.
fn money(v: &Value, key: &str) -> f64 {
    let minor = match v.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    };
    minor / 100.0
}

/// Extract the `{ "data": [...] }` list wrapper the Graph API nests
/// connections in.
fn connection<'a>(v: &'a Value, key: &str) -> Vec<&'a Value> {
    v.get(key)
        .and_then(|c| c.get("data"))
        .and_then(Value::as_array)
        .map(|a| a.iter().collect())
        .unwrap_or_default()
}

impl AdAccount {
    pub fn from_json(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name"),
            currency: text(v, "currency"),
            account_status: integer(v, "account_status"),
            disable_reason: integer(v, "disable_reason"),
            spend_cap: money(v, "spend_cap"),
            amount_spent: money(v, "amount_spent"),
        }
    }
}

impl AdSummary {
    fn from_json(v: &Value) -> Self {
        Self {
            effective_status: text(v, "effective_status"),
        }
    }
}

impl AdSetSummary {
    fn from_json(v: &Value) -> Self {
        Self {
            effective_status: text(v, "effective_status"),
            ads: connection(v, "ads").iter().map(|a| AdSummary::from_json(a)).collect(),
        }
    }
}

impl Campaign {
    pub fn from_json(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name"),
            status: text(v, "status"),
            effective_status: text(v, "effective_status"),
            configured_status: text(v, "configured_status"),
            account_id: text(v, "account_id"),
            spend_cap: money(v, "spend_cap"),
            amount_spent: money(v, "amount_spent"),
            daily_budget: money(v, "daily_budget"),
            lifetime_budget: money(v, "lifetime_budget"),
            ad_sets: connection(v, "adsets")
                .iter()
                .map(|s| AdSetSummary::from_json(s))
                .collect(),
        }
    }
}

impl AdSet {
    pub fn from_json(v: &Value) -> Self {
        Self {
            id: text(v, "id"),
            name: text(v, "name"),
            status: text(v, "status"),
            effective_status: text(v, "effective_status"),
            configured_status: text(v, "configured_status"),
            campaign_id: text(v, "campaign_id"),
            account_id: text(v, "account_id"),
            daily_budget: money(v, "daily_budget"),
            lifetime_budget: money(v, "lifetime_budget"),
            ads: connection(v, "ads").iter().map(|a| AdSummary::from_json(a)).collect(),
        }
    }
}

impl Ad {
    pub fn from_json(v: &Value) -> Self {
        let creative = v.get("creative").cloned().unwrap_or(Value::Null);
        let daily_budget = money(v, "daily_budget");
        let lifetime_budget = money(v, "lifetime_budget");
        Self {
            id: text(v, "id"),
            name: text(v, "name"),
            title: text(&creative, "title"),
            body: text(&creative, "body"),
            status: text(v, "status"),
            effective_status: text(v, "effective_status"),
            configured_status: text(v, "configured_status"),
            adset_id: text(v, "adset_id"),
            campaign_id: text(v, "campaign_id"),
            account_id: text(v, "account_id"),
            daily_budget,
            lifetime_budget,
            budget_source: if v.get("campaign_budget").is_some() {
                BudgetSource::Campaign
            } else {
                BudgetSource::AdSet
            },
            budget_type: if lifetime_budget > 0.0 && daily_budget == 0.0 {
                BudgetType::Lifetime
            } else {
                BudgetType::Daily
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn campaign_from_json_full() {
        let v = json!({
            "id": "c1",
            "name": "Summer Sale",
            "status": "ACTIVE",
            "effective_status": "ACTIVE",
            "configured_status": "ACTIVE",
            "account_id": "act1",
            "spend_cap": "10000",
            "amount_spent": "2550",
            "daily_budget": "500",
            "adsets": { "data": [
                { "effective_status": "ACTIVE",
                  "ads": { "data": [ { "effective_status": "PAUSED" } ] } }
            ]}
        });
        let c = Campaign::from_json(&v);
        assert_eq!(c.id, "c1");
        assert_eq!(c.spend_cap, 100.0);
        assert_eq!(c.amount_spent, 25.5);
        assert_eq!(c.daily_budget, 5.0);
        assert_eq!(c.lifetime_budget, 0.0);
        assert_eq!(c.ad_sets.len(), 1);
        assert_eq!(c.ad_sets[0].ads[0].effective_status, "PAUSED");
    }

    #[test]
    fn missing_optionals_collapse_to_zero() {
        let c = Campaign::from_json(&json!({ "id": "c1", "name": "Bare" }));
        assert_eq!(c.spend_cap, 0.0);
        assert_eq!(c.amount_spent, 0.0);
        assert!(c.ad_sets.is_empty());
        assert_eq!(c.effective_status, "");
    }

    #[test]
    fn money_accepts_numbers_and_strings() {
        let v = json!({ "a": "150", "b": 150, "c": "garbage" });
        assert_eq!(money(&v, "a"), 1.5);
        assert_eq!(money(&v, "b"), 1.5);
        assert_eq!(money(&v, "c"), 0.0);
        assert_eq!(money(&v, "missing"), 0.0);
    }

    #[test]
    fn ad_from_json_reads_creative_and_budget_type() {
        let v = json!({
            "id": "a1",
            "name": "Ad one",
            "creative": { "title": "Buy now", "body": "Great deal" },
            "effective_status": "ACTIVE",
            "adset_id": "as1",
            "campaign_id": "c1",
            "account_id": "act1",
            "lifetime_budget": "9900"
        });
        let ad = Ad::from_json(&v);
        assert_eq!(ad.title, "Buy now");
        assert_eq!(ad.body, "Great deal");
        assert_eq!(ad.lifetime_budget, 99.0);
        assert_eq!(ad.budget_type, BudgetType::Lifetime);
        assert_eq!(ad.budget_source, BudgetSource::AdSet);
    }

    #[test]
    fn account_status_accepts_string_codes() {
        let a = AdAccount::from_json(&json!({ "id": "act1", "account_status": "2" }));
        assert_eq!(a.account_status, 2);
    }
}
