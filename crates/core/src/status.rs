//! Canonical status resolution for campaigns, ad sets, and ads.
//!
//! The platform reports several partially overlapping status signals per
//! entity (raw, effective, configured) plus account-level overrides. The
//! dashboard shows exactly one label and severity class per row; this
//! module derives it.
//!
//! Resolution is an explicit ordered rule table: each rule is a named
//! predicate that either claims the entity or passes. Rules are evaluated
//! in sequence and the first match wins, which makes the priority order a
//! first-class, testable artifact. The final rule (the direct code
//! mapping) is total, so resolution never fails; unknown inputs degrade
//! to [`SeverityClass::Other`].

use serde::{Deserialize, Serialize};

use crate::model::{Ad, AdAccount, AdSet, Campaign};
use crate::types::EntityKind;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Account status codes that mean the account cannot deliver at all.
/// 1 = active and 9 = grace period still deliver.
pub const DISABLED_ACCOUNT_CODES: &[i64] = &[2, 3, 101, 102];

/// Effective statuses that count as "switched off" for child rollups.
const OFF_STATUSES: &[&str] = &["PAUSED", "ARCHIVED", "DELETED"];

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The seven-value coarse severity bucket used for filtering and
/// color-coding. Every entity resolves into exactly one of these;
/// unrecognized platform codes land in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityClass {
    Active,
    Paused,
    Completed,
    Rejected,
    WithIssues,
    InReview,
    Other,
}

impl SeverityClass {
    /// Convert from the wire value used by the status filter.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "with_issues" => Ok(Self::WithIssues),
            "in_review" => Ok(Self::InReview),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Invalid severity class '{s}'. Must be one of: active, paused, \
                 completed, rejected, with_issues, in_review, other"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::WithIssues => "with_issues",
            Self::InReview => "in_review",
            Self::Other => "other",
        }
    }

    /// Suggested display color for this class.
    pub fn color_hint(&self) -> &'static str {
        match self {
            Self::Active => "green",
            Self::Paused => "gray",
            Self::Completed => "blue",
            Self::Rejected => "red",
            Self::WithIssues => "orange",
            Self::InReview => "yellow",
            Self::Other => "gray",
        }
    }
}

/// A resolved status: display label plus severity class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResult {
    pub label: String,
    pub class: SeverityClass,
    pub color: &'static str,
}

impl StatusResult {
    fn new(label: impl Into<String>, class: SeverityClass) -> Self {
        Self {
            label: label.into(),
            class,
            color: class.color_hint(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution context
// ---------------------------------------------------------------------------

/// One direct child of the entity under resolution, with the effective
/// statuses of the ads beneath it. For an ad set's children (ads), each
/// child is its own single "descendant ad".
#[derive(Debug, Clone)]
pub struct ChildRollup {
    pub effective_status: String,
    pub ad_statuses: Vec<String>,
}

/// Everything a rule may inspect, pre-extracted from the entity and its
/// account so the rules themselves stay pure and uniform across kinds.
#[derive(Debug)]
pub struct StatusContext<'a> {
    pub kind: EntityKind,
    /// Effective status, falling back to the raw status when the platform
    /// omitted it. Always takes precedence for the direct mapping.
    pub effective_status: &'a str,
    /// User-configured status; consulted only to disambiguate
    /// unrecognized codes.
    pub configured_status: &'a str,
    pub account: Option<&'a AdAccount>,
    /// Ad-level disable reason code; 0 for campaigns and ad sets.
    pub disable_reason: i64,
    pub spend_cap: f64,
    pub amount_spent: f64,
    pub children: Vec<ChildRollup>,
}

impl StatusContext<'_> {
    fn is_active(&self) -> bool {
        self.effective_status == "ACTIVE"
    }

    fn descendant_ads(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .flat_map(|c| c.ad_statuses.iter().map(String::as_str))
    }
}

fn is_off(status: &str) -> bool {
    OFF_STATUSES.contains(&status)
}

/// Whether an ad-level status counts as off underneath a nominally ACTIVE
/// parent. `CAMPAIGN_PAUSED` on an ad while the campaign itself reads
/// ACTIVE is a platform propagation artifact and counts as off too.
fn ad_is_off(status: &str, parent_kind: EntityKind) -> bool {
    is_off(status) || (parent_kind == EntityKind::Campaign && status == "CAMPAIGN_PAUSED")
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A single resolution rule: returns `Some` to claim the entity.
pub struct Rule {
    pub name: &'static str,
    pub eval: fn(&StatusContext) -> Option<StatusResult>,
}

/// The resolution order. First match wins. Account-level checks run
/// before every entity-level signal; the child rollups run strictly
/// before the direct mapping and only for an ACTIVE own status; the
/// direct mapping is total.
pub const RULES: &[Rule] = &[
    Rule { name: "account_disabled", eval: account_disabled },
    Rule { name: "spend_cap_reached", eval: spend_cap_reached },
    Rule { name: "child_problems", eval: child_problems },
    Rule { name: "children_off", eval: children_off },
    Rule { name: "direct_mapping", eval: direct_mapping },
];

fn account_disabled(ctx: &StatusContext) -> Option<StatusResult> {
    let account_down = ctx
        .account
        .map(|a| DISABLED_ACCOUNT_CODES.contains(&a.account_status))
        .unwrap_or(false);
    let ad_disabled = ctx.kind == EntityKind::Ad && ctx.disable_reason != 0;

    if account_down || ad_disabled {
        Some(StatusResult::new("Account disabled", SeverityClass::Rejected))
    } else {
        None
    }
}

fn spend_cap_reached(ctx: &StatusContext) -> Option<StatusResult> {
    let account_capped = ctx
        .account
        .map(|a| a.spend_cap > 0.0 && a.amount_spent >= a.spend_cap)
        .unwrap_or(false);
    let entity_capped = ctx.spend_cap > 0.0 && ctx.amount_spent >= ctx.spend_cap;

    if account_capped || entity_capped {
        Some(StatusResult::new(
            "Spending limit reached",
            SeverityClass::WithIssues,
        ))
    } else {
        None
    }
}

fn child_problems(ctx: &StatusContext) -> Option<StatusResult> {
    if ctx.kind == EntityKind::Ad || !ctx.is_active() {
        return None;
    }
    if ctx.descendant_ads().any(|s| s == "DISAPPROVED") {
        return Some(StatusResult::new("Rejected", SeverityClass::Rejected));
    }
    if ctx.descendant_ads().any(|s| s == "WITH_ISSUES") {
        return Some(StatusResult::new("With issues", SeverityClass::WithIssues));
    }
    None
}

fn children_off(ctx: &StatusContext) -> Option<StatusResult> {
    if ctx.kind == EntityKind::Ad || !ctx.is_active() {
        return None;
    }

    if ctx.children.is_empty() {
        return Some(StatusResult::new("No ads", SeverityClass::Paused));
    }

    // Every direct child switched off.
    if ctx.children.iter().all(|c| is_off(&c.effective_status)) {
        let label = match ctx.kind {
            EntityKind::Campaign => "Ad sets off",
            _ => "Ads off",
        };
        return Some(StatusResult::new(label, SeverityClass::Paused));
    }

    // Every descendant ad switched off (including CAMPAIGN_PAUSED ads
    // under a campaign that still reads ACTIVE).
    let mut ads = ctx.descendant_ads().peekable();
    if ads.peek().is_some() && ctx.descendant_ads().all(|s| ad_is_off(s, ctx.kind)) {
        return Some(StatusResult::new("Ads off", SeverityClass::Paused));
    }

    // Restricting to children that are themselves running: every ad in
    // those children off. Catches a fully throttled sub-branch under a
    // nominally active parent.
    let active_children: Vec<_> = ctx
        .children
        .iter()
        .filter(|c| !is_off(&c.effective_status))
        .collect();
    let has_ads = active_children.iter().any(|c| !c.ad_statuses.is_empty());
    if has_ads
        && active_children
            .iter()
            .flat_map(|c| c.ad_statuses.iter())
            .all(|s| ad_is_off(s, ctx.kind))
    {
        return Some(StatusResult::new("Ads off", SeverityClass::Paused));
    }

    None
}

fn direct_mapping(ctx: &StatusContext) -> Option<StatusResult> {
    let result = match ctx.effective_status {
        "ACTIVE" => StatusResult::new("Active", SeverityClass::Active),
        "PAUSED" => StatusResult::new("Paused", SeverityClass::Paused),
        "ADSET_PAUSED" => StatusResult::new("Ad set off", SeverityClass::Paused),
        "CAMPAIGN_PAUSED" => StatusResult::new("Campaign off", SeverityClass::Paused),
        "DELETED" => StatusResult::new("Deleted", SeverityClass::Completed),
        "ARCHIVED" => StatusResult::new("Archived", SeverityClass::Completed),
        "WITH_ISSUES" => StatusResult::new("With issues", SeverityClass::WithIssues),
        "DISAPPROVED" => StatusResult::new("Rejected", SeverityClass::Rejected),
        "PENDING_REVIEW" | "IN_PROCESS" | "PREAPPROVAL" | "PREAPPROVED" => {
            StatusResult::new("In review", SeverityClass::InReview)
        }
        "CREDIT_CARD_NEEDED" | "PENDING_BILLING_INFO" => {
            StatusResult::new("Billing needed", SeverityClass::WithIssues)
        }
        "DISABLED" | "PENDING_PROCESS" => StatusResult::new("In process", SeverityClass::InReview),
        "PENDING_SETTLEMENT" => StatusResult::new("Pending settlement", SeverityClass::InReview),
        other => {
            // Unrecognized code: the configured status is the last-resort
            // disambiguator before the generic rendering.
            if ctx.configured_status == "PAUSED" {
                StatusResult::new("Paused", SeverityClass::Paused)
            } else {
                StatusResult::new(humanize(other), SeverityClass::Other)
            }
        }
    };
    Some(result)
}

/// Humanize a raw platform code: underscores to spaces, first letter
/// upper-cased, the rest lowered. `"FOO_BAR"` becomes `"Foo bar"`.
fn humanize(code: &str) -> String {
    let spaced = code.replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run the rule table over a prepared context. Never fails.
pub fn resolve(ctx: &StatusContext) -> StatusResult {
    for rule in RULES {
        if let Some(result) = (rule.eval)(ctx) {
            return result;
        }
    }
    // The direct mapping is total; this is unreachable but keeps the
    // function infallible if the table ever changes.
    StatusResult::new(humanize(ctx.effective_status), SeverityClass::Other)
}

/// Effective status with raw-status fallback.
fn effective_or_raw<'a>(effective: &'a str, raw: &'a str) -> &'a str {
    if effective.is_empty() {
        raw
    } else {
        effective
    }
}

pub fn resolve_campaign(campaign: &Campaign, account: Option<&AdAccount>) -> StatusResult {
    let children = campaign
        .ad_sets
        .iter()
        .map(|s| ChildRollup {
            effective_status: s.effective_status.clone(),
            ad_statuses: s.ads.iter().map(|a| a.effective_status.clone()).collect(),
        })
        .collect();
    resolve(&StatusContext {
        kind: EntityKind::Campaign,
        effective_status: effective_or_raw(&campaign.effective_status, &campaign.status),
        configured_status: &campaign.configured_status,
        account,
        disable_reason: 0,
        spend_cap: campaign.spend_cap,
        amount_spent: campaign.amount_spent,
        children,
    })
}

pub fn resolve_ad_set(ad_set: &AdSet, account: Option<&AdAccount>) -> StatusResult {
    // Each ad is both a direct child and its own single descendant ad.
    let children = ad_set
        .ads
        .iter()
        .map(|a| ChildRollup {
            effective_status: a.effective_status.clone(),
            ad_statuses: vec![a.effective_status.clone()],
        })
        .collect();
    resolve(&StatusContext {
        kind: EntityKind::AdSet,
        effective_status: effective_or_raw(&ad_set.effective_status, &ad_set.status),
        configured_status: &ad_set.configured_status,
        account,
        disable_reason: 0,
        spend_cap: 0.0,
        amount_spent: 0.0,
        children,
    })
}

pub fn resolve_ad(ad: &Ad, account: Option<&AdAccount>) -> StatusResult {
    resolve(&StatusContext {
        kind: EntityKind::Ad,
        effective_status: effective_or_raw(&ad.effective_status, &ad.status),
        configured_status: &ad.configured_status,
        account,
        disable_reason: account.map(|a| a.disable_reason).unwrap_or(0),
        spend_cap: 0.0,
        amount_spent: 0.0,
        children: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
