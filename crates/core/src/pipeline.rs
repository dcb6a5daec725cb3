//! List filtering and sorting for the campaign/ad-set/ad tabs.
//!
//! Pure and idempotent: re-running over the same collection yields the
//! same order. Filtering is search (case-insensitive substring), severity
//! class, and hierarchical parent scoping; sorting is a single
//! `(key, direction)` pair where the direction cycles on repeated
//! selection of the same key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Ad, AdSet, Campaign};
use crate::status::{SeverityClass, StatusResult};

// ---------------------------------------------------------------------------
// Filter types
// ---------------------------------------------------------------------------

/// Severity-class filter: `All` passes everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Class(SeverityClass),
}

impl StatusFilter {
    /// Parse the wire value (`all` or a severity class).
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        if s == "all" {
            Ok(Self::All)
        } else {
            SeverityClass::from_str_value(s).map(Self::Class)
        }
    }
}

/// The full filter applied to one tab's collection.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: StatusFilter,
    /// Selected campaign ids; empty means no restriction.
    pub campaign_ids: Vec<String>,
    /// Selected ad-set ids; empty means no restriction. For ads, a
    /// non-empty ad-set selection wins over the campaign selection.
    pub adset_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Sort types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Status,
    DailyBudget,
    LifetimeBudget,
    AmountSpent,
}

impl SortKey {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "daily_budget" => Ok(Self::DailyBudget),
            "lifetime_budget" => Ok(Self::LifetimeBudget),
            "amount_spent" => Ok(Self::AmountSpent),
            _ => Err(format!("Invalid sort key '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

/// The single active sort. `toggle` implements the UI cycle: selecting
/// the same key steps none -> asc -> desc -> none; selecting a different
/// key resets to asc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = match self.direction {
                SortDirection::None => SortDirection::Asc,
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::None,
            };
            if self.direction == SortDirection::None {
                self.key = None;
            }
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }
}

// ---------------------------------------------------------------------------
// Entity access
// ---------------------------------------------------------------------------

/// What the pipeline needs from a listable entity. Implemented by
/// campaigns, ad sets, and ads; keeps `apply_filters` generic over the
/// three tabs.
pub trait ListEntry {
    /// Fields matched by the search box (OR semantics).
    fn search_haystacks(&self) -> Vec<&str>;
    /// Owning campaign id, if this level has one.
    fn campaign_id(&self) -> Option<&str>;
    /// Owning ad-set id, if this level has one.
    fn adset_id(&self) -> Option<&str>;
    /// Numeric sort field, when the key is numeric for this entity.
    fn numeric_field(&self, key: SortKey) -> Option<f64>;
    /// String sort field, when the key is textual for this entity.
    fn string_field(&self, key: SortKey) -> Option<&str>;
}

impl ListEntry for Campaign {
    fn search_haystacks(&self) -> Vec<&str> {
        vec![&self.name]
    }
    fn campaign_id(&self) -> Option<&str> {
        None
    }
    fn adset_id(&self) -> Option<&str> {
        None
    }
    fn numeric_field(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::DailyBudget => Some(self.daily_budget),
            SortKey::LifetimeBudget => Some(self.lifetime_budget),
            SortKey::AmountSpent => Some(self.amount_spent),
            _ => None,
        }
    }
    fn string_field(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Name => Some(&self.name),
            _ => None,
        }
    }
}

impl ListEntry for AdSet {
    fn search_haystacks(&self) -> Vec<&str> {
        vec![&self.name]
    }
    fn campaign_id(&self) -> Option<&str> {
        Some(&self.campaign_id)
    }
    fn adset_id(&self) -> Option<&str> {
        None
    }
    fn numeric_field(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::DailyBudget => Some(self.daily_budget),
            SortKey::LifetimeBudget => Some(self.lifetime_budget),
            _ => None,
        }
    }
    fn string_field(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Name => Some(&self.name),
            _ => None,
        }
    }
}

impl ListEntry for Ad {
    fn search_haystacks(&self) -> Vec<&str> {
        vec![&self.name, &self.title, &self.body]
    }
    fn campaign_id(&self) -> Option<&str> {
        Some(&self.campaign_id)
    }
    fn adset_id(&self) -> Option<&str> {
        Some(&self.adset_id)
    }
    fn numeric_field(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::DailyBudget => Some(self.daily_budget),
            SortKey::LifetimeBudget => Some(self.lifetime_budget),
            _ => None,
        }
    }
    fn string_field(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Name => Some(&self.name),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter and sort one tab's collection.
///
/// `resolve` supplies each entity's resolved status (the caller closes
/// over the account map); it backs both the class filter and the
/// synthetic `Status` sort key, which orders by resolved label rather
/// than raw code.
pub fn apply_filters<E, F>(
    entities: Vec<E>,
    filter: &ListFilter,
    sort: &SortState,
    resolve: F,
) -> Vec<E>
where
    E: ListEntry,
    F: Fn(&E) -> StatusResult,
{
    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    let mut rows: Vec<(E, StatusResult)> = entities
        .into_iter()
        .map(|e| {
            let status = resolve(&e);
            (e, status)
        })
        .filter(|(e, status)| {
            matches_search(e, needle.as_deref())
                && matches_status(status, filter.status)
                && matches_scope(e, filter)
        })
        .collect();

    if let (Some(key), dir) = (sort.key, sort.direction) {
        if dir != SortDirection::None {
            // Stable sort: entries that compare equal keep input order.
            rows.sort_by(|a, b| {
                let ord = compare(&a.0, &a.1, &b.0, &b.1, key);
                match dir {
                    SortDirection::Desc => ord.reverse(),
                    _ => ord,
                }
            });
        }
    }

    rows.into_iter().map(|(e, _)| e).collect()
}

fn matches_search<E: ListEntry>(entity: &E, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(q) => entity
            .search_haystacks()
            .iter()
            .any(|h| h.to_lowercase().contains(q)),
    }
}

fn matches_status(status: &StatusResult, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Class(class) => status.class == class,
    }
}

/// Hierarchical scoping. Only one criterion applies at a time: for ads, a
/// non-empty ad-set selection suppresses the campaign selection entirely.
fn matches_scope<E: ListEntry>(entity: &E, filter: &ListFilter) -> bool {
    if let Some(adset_id) = entity.adset_id() {
        if !filter.adset_ids.is_empty() {
            return filter.adset_ids.iter().any(|id| id == adset_id);
        }
    }
    if let Some(campaign_id) = entity.campaign_id() {
        if !filter.campaign_ids.is_empty() {
            return filter.campaign_ids.iter().any(|id| id == campaign_id);
        }
    }
    true
}

fn compare<E: ListEntry>(
    a: &E,
    a_status: &StatusResult,
    b: &E,
    b_status: &StatusResult,
    key: SortKey,
) -> Ordering {
    if key == SortKey::Status {
        return cmp_text(&a_status.label, &b_status.label);
    }
    match (a.numeric_field(key), b.numeric_field(key)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => match (a.string_field(key), b.string_field(key)) {
            (Some(x), Some(y)) => cmp_text(x, y),
            // Mismatched or absent fields compare equal (stable no-op).
            _ => Ordering::Equal,
        },
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
