//! Shared type aliases and small enums used across the workspace.

use serde::{Deserialize, Serialize};

/// Entity identifier as issued by the ads platform (numeric string).
pub type EntityId = String;

/// UTC timestamp alias used throughout the workspace.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The three entity levels of an ad account's campaign tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Campaign,
    AdSet,
    Ad,
}

impl EntityKind {
    /// Convert from the URL path segment used by the REST surface.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "campaign" => Ok(Self::Campaign),
            "adset" => Ok(Self::AdSet),
            "ad" => Ok(Self::Ad),
            _ => Err(format!(
                "Invalid entity kind '{s}'. Must be one of: campaign, adset, ad"
            )),
        }
    }

    /// The URL path segment / wire value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::AdSet => "adset",
            Self::Ad => "ad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_round_trip() {
        for kind in &[EntityKind::Campaign, EntityKind::AdSet, EntityKind::Ad] {
            assert_eq!(EntityKind::from_str_value(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn entity_kind_invalid_rejected() {
        let result = EntityKind::from_str_value("account");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid entity kind"));
    }
}
