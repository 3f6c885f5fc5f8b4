//! Detection configuration.
//!
//! Every selector, keyword and constant the pipeline uses lives here so that a
//! markup change upstream, a different locale, or a test can override them
//! without touching extraction code. All fields have defaults; a TOML file
//! only needs the keys it changes.
//!
//! The reference values are kept in `seed_data/detection.toml` and embedded at
//! compile time via `include_str!`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Error types for loading and validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid CSS selector for {name} ({selector}): {reason}")]
    InvalidSelector {
        name: &'static str,
        selector: String,
        reason: String,
    },
    #[error("Invalid pattern for {name} ({pattern}): {reason}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        reason: String,
    },
    #[error("Invalid confidence settings: {0}")]
    InvalidConfidence(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    pub selectors: SelectorConfig,
    pub owners: OwnerConfig,
    pub summary: SummaryConfig,
    pub classifier: ClassifierConfig,
}

/// CSS selectors locating the regions of the vehicle page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorConfig {
    pub history_region: String,
    /// Two-column label/value cell, used both for history rows and spec facts.
    pub value_cell: String,
    pub summary_region: String,
    pub summary_heading: String,
    pub edition_option: String,
    pub secondary_heading: String,
    pub details_region: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            history_region: r#"section[data-sectiontype="History"]"#.into(),
            value_cell: "div.col-6.col-sm-7.value".into(),
            summary_region: r#"section[data-sectiontype="Summary"]"#.into(),
            summary_heading: "h1".into(),
            edition_option: "select.edition-select option[selected]".into(),
            secondary_heading: "h2".into(),
            details_region: r#"section[data-sectiontype="Details"]"#.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OwnerConfig {
    /// Cells shorter than this (in characters) are layout artifacts.
    pub min_text_len: usize,
    /// Display-name template prefix: `"<prefix> <cell text>"`.
    pub name_prefix: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            min_text_len: 2,
            name_prefix: "Current owner".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    pub unknown_label: String,
    /// Regex for the page's own registration label text node.
    pub registration_label_pattern: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            unknown_label: "Unknown".into(),
            registration_label_pattern: r"(?i)voertuig is geregistreerd".into(),
        }
    }
}

/// How the classifier turns signals into a confidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// One fixed confidence per decision branch.
    #[default]
    Fixed,
    /// Points accumulated across signals, normalised to 0-100.
    Weighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub policy: ScoringPolicy,
    pub fleet_marker: String,
    pub government_keywords: Vec<String>,
    /// Only consulted by the weighted policy.
    pub fleet_keywords: Vec<String>,
    /// Registration label wording that marks a generic legal entity. Weighted policy only.
    pub generic_label_marker: String,
    pub confidence: ConfidenceConfig,
    pub score: ScoreConfig,
    pub weighted: WeightedConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::Fixed,
            fleet_marker: "fleetowner".into(),
            government_keywords: ["politie", "ministerie", "rijksoverheid", "gemeente", "municipal"]
                .into_iter()
                .map(String::from)
                .collect(),
            fleet_keywords: [
                "lease",
                "autolease",
                "fleet",
                "mobiliteit",
                "leaseplan",
                "athlon",
                "arval",
                "alphabet",
                "pon",
                "bentley",
                "leasebedrijf",
                "verhuur",
                "maatschappij",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            generic_label_marker: "rechtspersoon".into(),
            confidence: ConfidenceConfig::default(),
            score: ScoreConfig::default(),
            weighted: WeightedConfig::default(),
        }
    }
}

/// Confidence per decision branch of the fixed policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfidenceConfig {
    pub no_data: u8,
    pub fleet_owner: u8,
    pub government: u8,
    pub private: u8,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            no_data: 10,
            fleet_owner: 95,
            government: 85,
            private: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreConfig {
    pub flagged: i32,
    pub unflagged: i32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            flagged: 10,
            unflagged: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightedConfig {
    pub government_points: i32,
    pub fleet_points: i32,
    pub generic_label_points: i32,
    pub max_points: i32,
    /// Minimum confidence for the flagged category.
    pub threshold: u8,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            government_points: 8,
            fleet_points: 5,
            generic_label_points: 2,
            max_points: 10,
            threshold: 45,
        }
    }
}

impl DetectionConfig {
    /// Parses a (possibly partial) TOML document and validates it.
    pub fn from_toml_str(toml_content: &str) -> Result<Self, ConfigError> {
        let config: DetectionConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded detection config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Loads the reference configuration embedded from `seed_data/detection.toml`.
    pub fn reference() -> Result<Self, ConfigError> {
        Self::from_toml_str(include_str!("../../seed_data/detection.toml"))
    }

    /// Checks the numeric constants. Selectors and patterns are checked when
    /// the pipeline compiles them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier.confidence;
        for (name, value) in [
            ("no_data", c.no_data),
            ("fleet_owner", c.fleet_owner),
            ("government", c.government),
            ("private", c.private),
        ] {
            if value > 100 {
                return Err(ConfigError::InvalidConfidence(format!(
                    "{} confidence {} exceeds 100",
                    name, value
                )));
            }
        }
        if c.government >= c.fleet_owner {
            return Err(ConfigError::InvalidConfidence(format!(
                "government confidence {} must be below fleet_owner confidence {}",
                c.government, c.fleet_owner
            )));
        }
        let w = &self.classifier.weighted;
        if w.max_points <= 0 {
            return Err(ConfigError::InvalidConfidence(format!(
                "weighted max_points must be positive, got {}",
                w.max_points
            )));
        }
        for (name, value) in [
            ("government_points", w.government_points),
            ("fleet_points", w.fleet_points),
            ("generic_label_points", w.generic_label_points),
        ] {
            if !(0..=w.max_points).contains(&value) {
                return Err(ConfigError::InvalidConfidence(format!(
                    "weighted {} {} must be between 0 and max_points {}",
                    name, value, w.max_points
                )));
            }
        }
        if w.threshold > 100 {
            return Err(ConfigError::InvalidConfidence(format!(
                "weighted threshold {} exceeds 100",
                w.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_matches_defaults() {
        let reference = DetectionConfig::reference().unwrap();
        assert_eq!(reference, DetectionConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let toml = r#"
[owners]
name_prefix = "Huidige eigenaar"

[classifier.confidence]
government = 80
"#;
        let config = DetectionConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.owners.name_prefix, "Huidige eigenaar");
        assert_eq!(config.owners.min_text_len, 2);
        assert_eq!(config.classifier.confidence.government, 80);
        assert_eq!(config.classifier.confidence.fleet_owner, 95);
        assert_eq!(config.selectors, SelectorConfig::default());
    }

    #[test]
    fn weighted_policy_parses() {
        let config = DetectionConfig::from_toml_str("[classifier]\npolicy = \"weighted\"\n").unwrap();
        assert_eq!(config.classifier.policy, ScoringPolicy::Weighted);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = DetectionConfig::from_toml_str("[owners]\nprefix = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn confidence_above_100_rejected() {
        let result = DetectionConfig::from_toml_str("[classifier.confidence]\nprivate = 101\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfidence(_))));
    }

    #[test]
    fn government_must_rank_below_fleet_owner() {
        let result = DetectionConfig::from_toml_str(
            "[classifier.confidence]\ngovernment = 95\nfleet_owner = 95\n",
        );
        assert!(matches!(result, Err(ConfigError::InvalidConfidence(_))));
    }

    #[test]
    fn weighted_points_must_be_bounded() {
        for toml in [
            "[classifier.weighted]\ngovernment_points = 2147483647\n",
            "[classifier.weighted]\nfleet_points = -1\n",
            "[classifier.weighted]\ngeneric_label_points = 11\n",
        ] {
            let result = DetectionConfig::from_toml_str(toml);
            assert!(matches!(result, Err(ConfigError::InvalidConfidence(_))), "{}", toml);
        }
    }

    #[test]
    fn weighted_points_up_to_max_accepted() {
        let config = DetectionConfig::from_toml_str(
            "[classifier.weighted]\ngovernment_points = 10\nfleet_points = 0\n",
        )
        .unwrap();
        assert_eq!(config.classifier.weighted.government_points, 10);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = DetectionConfig::from_file("/nonexistent/fleetdetect.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
