use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::Selector;

use crate::config::SelectorConfig;
use crate::document::{compile_selector, element_text, region_text, Document};
use crate::types::{SpecField, SpecMap};
use crate::ConfigError;

static POWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,3}\s?PK").unwrap());
static TORQUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{2,4}\s?Nm").unwrap());

/// A free-text spec: alternatives are tried in order and the first match is formatted.
struct TextRule {
    field: SpecField,
    patterns: Vec<Regex>,
    format: fn(&Captures<'_>) -> String,
}

static TEXT_RULES: LazyLock<Vec<TextRule>> = LazyLock::new(|| {
    vec![
        TextRule {
            field: SpecField::TopSpeed,
            patterns: vec![
                Regex::new(r"(?i)top\s*snelheid\D{0,20}?(\d{2,3})\s*km/?[hu]").unwrap(),
                Regex::new(
                    r"(?i)(?:max(?:imum|imale)?\s+snelheid|top\s*speed)\D{0,20}?(\d{2,3})\s*km/?[hu]",
                )
                .unwrap(),
            ],
            format: |c| format!("{} km/h", &c[1]),
        },
        TextRule {
            field: SpecField::Acceleration,
            patterns: vec![Regex::new(
                r"(?i)0\s*[-–]\s*100(?:\s*km/?[hu])?\D{0,20}?(\d{1,2}[.,]\d{1,2})\s*(?:s\b|sec)",
            )
            .unwrap()],
            format: |c| format!("{}s", c[1].replace(',', ".")),
        },
        TextRule {
            field: SpecField::Displacement,
            patterns: vec![Regex::new(r"(?i)(\d{3,4})\s?cc\b").unwrap()],
            format: |c| format!("{}cc", &c[1]),
        },
        TextRule {
            field: SpecField::FuelType,
            patterns: vec![Regex::new(r"(?i)\b(diesel|petrol|electric|hybrid)\b").unwrap()],
            format: |c| capitalize(&c[1]),
        },
    ]
});

/// Finds engine and performance facts.
///
/// Power and torque come from the document-wide value cells; everything else
/// from the free text of the details region. First match wins per fact.
pub struct SpecExtractor {
    value_cell: Selector,
    details_region: Selector,
}

impl SpecExtractor {
    pub fn new(selectors: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            value_cell: compile_selector("value_cell", &selectors.value_cell)?,
            details_region: compile_selector("details_region", &selectors.details_region)?,
        })
    }

    pub fn extract(&self, doc: &Document) -> SpecMap {
        let mut specs = SpecMap::new();

        if let Some(power) = self.power(doc) {
            specs.insert(SpecField::Power, power);
        }

        if let Some(details) = doc.region(&self.details_region) {
            let text = region_text(details);
            for rule in TEXT_RULES.iter() {
                if let Some(caps) = rule.patterns.iter().find_map(|re| re.captures(&text)) {
                    specs.insert(rule.field, (rule.format)(&caps));
                }
            }
        } else {
            tracing::debug!("No details region");
        }

        tracing::debug!("Extracted {} specs", specs.len());
        specs
    }

    /// "150PK", or "150PK / 250Nm" when torque is also listed. Torque alone is not reported.
    fn power(&self, doc: &Document) -> Option<String> {
        let mut power = None;
        let mut torque = None;
        for text in doc.select_all(&self.value_cell).map(element_text) {
            if power.is_none() {
                power = POWER_RE.find(&text).map(|m| compact(m.as_str()));
            }
            if torque.is_none() {
                torque = TORQUE_RE.find(&text).map(|m| compact(m.as_str()));
            }
            if power.is_some() && torque.is_some() {
                break;
            }
        }
        let power = power?;
        Some(match torque {
            Some(torque) => format!("{} / {}", power, torque),
            None => power,
        })
    }
}

fn compact(fragment: &str) -> String {
    fragment.split_whitespace().collect()
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
