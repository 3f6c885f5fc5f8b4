use scraper::Selector;

use crate::config::{OwnerConfig, SelectorConfig};
use crate::document::{compile_selector, element_text, Document};
use crate::types::RawOwnerEntry;
use crate::ConfigError;

/// Reads the value cells of the ownership-history section.
///
/// Rows are returned in document order. The page is assumed to list owners
/// oldest first, so the last entry is treated as the current owner.
pub struct OwnerExtractor {
    history_region: Selector,
    value_cell: Selector,
    min_text_len: usize,
    name_prefix: String,
}

impl OwnerExtractor {
    pub fn new(selectors: &SelectorConfig, config: &OwnerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            history_region: compile_selector("history_region", &selectors.history_region)?,
            value_cell: compile_selector("value_cell", &selectors.value_cell)?,
            min_text_len: config.min_text_len,
            name_prefix: config.name_prefix.clone(),
        })
    }

    pub fn extract(&self, doc: &Document) -> Vec<RawOwnerEntry> {
        let Some(history) = doc.region(&self.history_region) else {
            tracing::debug!("No ownership history region");
            return Vec::new();
        };

        let owners: Vec<RawOwnerEntry> = history
            .select(&self.value_cell)
            .map(element_text)
            .filter(|text| text.chars().count() >= self.min_text_len.max(1))
            .map(|text| RawOwnerEntry {
                normalized_name: format!("{} {}", self.name_prefix, text),
                raw_text: text,
                dates: Vec::new(),
            })
            .collect();

        tracing::debug!("Extracted {} ownership history entries", owners.len());
        owners
    }
}
