//! Records produced by the pipeline. Field names are the JSON wire contract.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the ownership-history section, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOwnerEntry {
    #[serde(alias = "raw")]
    pub raw_text: String,
    pub normalized_name: String,
    /// Reserved for ownership periods; always empty for now.
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub display_text: String,
}

/// Specification facts the extractor knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecField {
    Power,
    TopSpeed,
    Acceleration,
    Displacement,
    FuelType,
}

impl SpecField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::TopSpeed => "top_speed",
            Self::Acceleration => "acceleration",
            Self::Displacement => "displacement",
            Self::FuelType => "fuel_type",
        }
    }
}

impl fmt::Display for SpecField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matched specs only. A field that did not match has no key.
pub type SpecMap = BTreeMap<SpecField, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Private,
    LikelyFleetOrUndercover,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::LikelyFleetOrUndercover => "LIKELY_FLEET_OR_UNDERCOVER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict on the current owner.
///
/// `confidence` is the 0-100 presentation value; `score` is the coarse
/// severity bucket used for grouping. `reasons` always has at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub score: i32,
    /// `normalized_name` of the entry the verdict was based on.
    #[serde(default)]
    pub last_owner_name: Option<String>,
}

impl ClassificationResult {
    pub fn is_flagged(&self) -> bool {
        self.category == Category::LikelyFleetOrUndercover
    }
}

/// Everything the pipeline learned from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub identifier: String,
    pub vehicle_summary: VehicleSummary,
    pub specs: SpecMap,
    pub owners: Vec<RawOwnerEntry>,
    pub classification: ClassificationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_field_keys_are_snake_case() {
        let mut specs = SpecMap::new();
        specs.insert(SpecField::FuelType, "Diesel".into());
        specs.insert(SpecField::Power, "150PK".into());
        let json = serde_json::to_string(&specs).unwrap();
        assert_eq!(json, r#"{"power":"150PK","fuel_type":"Diesel"}"#);
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::LikelyFleetOrUndercover).unwrap(),
            "\"LIKELY_FLEET_OR_UNDERCOVER\""
        );
        assert_eq!(serde_json::to_string(&Category::Private).unwrap(), "\"PRIVATE\"");
        assert_eq!(Category::Private.to_string(), "PRIVATE");
    }

    #[test]
    fn owner_entry_accepts_raw_alias() {
        let entry: RawOwnerEntry = serde_json::from_str(
            r#"{"raw":"Fleetowner BV","normalized_name":"Current owner Fleetowner BV"}"#,
        )
        .unwrap();
        assert_eq!(entry.raw_text, "Fleetowner BV");
        assert!(entry.dates.is_empty());
    }

    #[test]
    fn registration_label_omitted_when_absent() {
        let record = AnalysisRecord {
            identifier: "AB123C".into(),
            vehicle_summary: VehicleSummary {
                display_text: "Unknown".into(),
            },
            specs: SpecMap::new(),
            owners: vec![],
            classification: ClassificationResult {
                category: Category::Private,
                confidence: 10,
                reasons: vec!["no ownership history available".into()],
                score: 0,
                last_owner_name: None,
            },
            registration_label: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("registration_label").is_none());
        assert_eq!(value["specs"], serde_json::json!({}));
        assert_eq!(value["classification"]["last_owner_name"], serde_json::Value::Null);
    }
}
