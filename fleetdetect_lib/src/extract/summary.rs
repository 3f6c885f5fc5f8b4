use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::config::{SelectorConfig, SummaryConfig};
use crate::document::{compile_pattern, compile_selector, element_text, region_text, Document};
use crate::types::VehicleSummary;
use crate::ConfigError;

// Any four digits, no range check: "1598cc" reads as year 1598.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Builds the display line "<make model> <edition> (<year>)" from the summary region.
pub struct SummaryExtractor {
    summary_region: Selector,
    heading: Selector,
    edition_option: Selector,
    secondary_heading: Selector,
    registration_label: Regex,
    unknown_label: String,
}

impl SummaryExtractor {
    pub fn new(selectors: &SelectorConfig, config: &SummaryConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            summary_region: compile_selector("summary_region", &selectors.summary_region)?,
            heading: compile_selector("summary_heading", &selectors.summary_heading)?,
            edition_option: compile_selector("edition_option", &selectors.edition_option)?,
            secondary_heading: compile_selector("secondary_heading", &selectors.secondary_heading)?,
            registration_label: compile_pattern(
                "registration_label_pattern",
                &config.registration_label_pattern,
            )?,
            unknown_label: config.unknown_label.clone(),
        })
    }

    pub fn extract(&self, doc: &Document) -> VehicleSummary {
        let Some(region) = doc.region(&self.summary_region) else {
            tracing::debug!("No summary region");
            return self.unknown();
        };

        let model = first_text(region, &self.heading).unwrap_or_else(|| self.unknown_label.clone());
        let edition = first_text(region, &self.edition_option)
            .or_else(|| first_text(region, &self.secondary_heading));
        let text = region_text(region);
        let year = YEAR_RE.find(&text).map(|m| m.as_str());

        let mut display_text = format!("{} {}", model, edition.as_deref().unwrap_or(""))
            .trim()
            .to_string();
        if let Some(year) = year {
            display_text.push_str(&format!(" ({})", year));
        }
        if display_text.is_empty() {
            return self.unknown();
        }
        VehicleSummary { display_text }
    }

    /// The page's own registration wording, e.g. "Voertuig is geregistreerd op een rechtspersoon".
    pub fn registration_label(&self, doc: &Document) -> Option<String> {
        doc.find_text(&self.registration_label)
    }

    fn unknown(&self) -> VehicleSummary {
        VehicleSummary {
            display_text: self.unknown_label.clone(),
        }
    }
}

fn first_text(region: ElementRef<'_>, selector: &Selector) -> Option<String> {
    region
        .select(selector)
        .map(element_text)
        .find(|t| !t.is_empty())
}
