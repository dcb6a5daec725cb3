//! Shared query parameter types for API handlers.
//!
//! The three list endpoints take the same parameter set; the conversion
//! into the core pipeline's types lives here so the handlers stay thin.

use chrono::NaiveDate;
use serde::Deserialize;

use adboard_core::pipeline::{ListFilter, SortDirection, SortKey, SortState, StatusFilter};
use adboard_meta::DateRange;

/// Query parameters for the campaign/ad-set/ad list endpoints.
///
/// `campaign_ids` / `adset_ids` are comma-separated id lists; an absent
/// or empty parameter means no restriction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub campaign_ids: Option<String>,
    pub adset_ids: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    #[serde(default)]
    pub refresh: bool,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl ListParams {
    pub fn filter(&self) -> Result<ListFilter, String> {
        let status = match self.status.as_deref() {
            None => StatusFilter::All,
            Some(s) => StatusFilter::from_str_value(s)?,
        };
        Ok(ListFilter {
            search: self.search.clone(),
            status,
            campaign_ids: split_ids(self.campaign_ids.as_deref()),
            adset_ids: split_ids(self.adset_ids.as_deref()),
        })
    }

    pub fn sort_state(&self) -> Result<SortState, String> {
        let Some(key) = self.sort.as_deref() else {
            return Ok(SortState::default());
        };
        let key = SortKey::from_str_value(key)?;
        let direction = match self.direction.as_deref() {
            // A sort key without a direction means ascending.
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some("none") => SortDirection::None,
            Some(other) => return Err(format!("Invalid sort direction '{other}'")),
        };
        Ok(SortState {
            key: Some(key),
            direction,
        })
    }

    pub fn date_range(&self) -> Result<Option<DateRange>, String> {
        match (self.since, self.until) {
            (Some(since), Some(until)) => {
                if since > until {
                    return Err("'since' must not be after 'until'".to_string());
                }
                Ok(Some(DateRange { since, until }))
            }
            (None, None) => Ok(None),
            _ => Err("'since' and 'until' must be provided together".to_string()),
        }
    }
}

fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
