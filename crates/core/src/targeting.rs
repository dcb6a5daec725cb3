//! Typed view of the Graph targeting payload.
//!
//! The platform returns targeting as a deeply nested dynamic object; the
//! dashboard consumes only the age range, country list, and interest
//! list, so those are parsed into explicit structures and every other
//! field is dropped at this boundary. Parsing never fails; missing
//! pieces take their defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Targeting {
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub countries: Vec<String>,
    pub interests: Vec<Interest>,
}

impl Targeting {
    pub fn from_json(v: &Value) -> Self {
        let age = |key: &str| v.get(key).and_then(Value::as_u64).map(|n| n.min(255) as u8);

        let countries = v
            .get("geo_locations")
            .and_then(|g| g.get("countries"))
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|c| c.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        // Interests sit inside the first flexible_spec entry or at the
        // top level, depending on how the campaign was created.
        let interest_values = v
            .get("interests")
            .and_then(Value::as_array)
            .cloned()
            .or_else(|| {
                v.get("flexible_spec")
                    .and_then(Value::as_array)
                    .and_then(|specs| specs.first())
                    .and_then(|s| s.get("interests"))
                    .and_then(Value::as_array)
                    .cloned()
            })
            .unwrap_or_default();

        let interests = interest_values
            .iter()
            .filter_map(|i| {
                let id = i.get("id").and_then(Value::as_str)?;
                let name = i.get("name").and_then(Value::as_str).unwrap_or("");
                Some(Interest {
                    id: id.to_string(),
                    name: name.to_string(),
                })
            })
            .collect();

        Self {
            age_min: age("age_min"),
            age_max: age("age_max"),
            countries,
            interests,
        }
    }

    /// Serialize into the shape the Graph API expects on campaign create.
    pub fn to_json(&self) -> Value {
        let mut obj = serde_json::Map::new();
        if let Some(min) = self.age_min {
            obj.insert("age_min".into(), min.into());
        }
        if let Some(max) = self.age_max {
            obj.insert("age_max".into(), max.into());
        }
        if !self.countries.is_empty() {
            obj.insert(
                "geo_locations".into(),
                serde_json::json!({ "countries": self.countries }),
            );
        }
        if !self.interests.is_empty() {
            obj.insert(
                "interests".into(),
                serde_json::json!(self
                    .interests
                    .iter()
                    .map(|i| serde_json::json!({ "id": i.id, "name": i.name }))
                    .collect::<Vec<_>>()),
            );
        }
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_consumed_fields_and_drops_the_rest() {
        let v = json!({
            "age_min": 21,
            "age_max": 45,
            "geo_locations": { "countries": ["US", "CA"], "cities": [{"key": "777"}] },
            "interests": [ { "id": "6003", "name": "Fitness" } ],
            "publisher_platforms": ["facebook"],
            "device_platforms": ["mobile"]
        });
        let t = Targeting::from_json(&v);
        assert_eq!(t.age_min, Some(21));
        assert_eq!(t.age_max, Some(45));
        assert_eq!(t.countries, vec!["US", "CA"]);
        assert_eq!(t.interests.len(), 1);
        assert_eq!(t.interests[0].name, "Fitness");
    }

    #[test]
    fn interests_found_inside_flexible_spec() {
        let v = json!({
            "flexible_spec": [ { "interests": [ { "id": "1", "name": "Running" } ] } ]
        });
        let t = Targeting::from_json(&v);
        assert_eq!(t.interests.len(), 1);
        assert_eq!(t.interests[0].id, "1");
    }

    #[test]
    fn empty_payload_gives_defaults() {
        let t = Targeting::from_json(&json!({}));
        assert_eq!(t, Targeting::default());
    }

    #[test]
    fn interest_without_id_is_dropped() {
        let v = json!({ "interests": [ { "name": "No id" } ] });
        assert!(Targeting::from_json(&v).interests.is_empty());
    }

    #[test]
    fn to_json_round_trips() {
        let t = Targeting {
            age_min: Some(18),
            age_max: Some(65),
            countries: vec!["DE".into()],
            interests: vec![Interest {
                id: "42".into(),
                name: "Chess".into(),
            }],
        };
        assert_eq!(Targeting::from_json(&t.to_json()), t);
    }
}
