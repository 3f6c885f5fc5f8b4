//! Ownership classification.
//!
//! Only the most recent history entry is inspected. Rules are evaluated in
//! priority order and the first that fires decides the verdict:
//!
//! 1. no history at all: private, low confidence
//! 2. fleet-owner marker in the current owner's text
//! 3. government/undercover keyword in the current owner's text
//! 4. otherwise private
//!
//! Under [`ScoringPolicy::Fixed`] each branch carries a fixed confidence.
//! [`ScoringPolicy::Weighted`] keeps rules 1 and 2 and replaces 3-4 with
//! points accumulated over keyword and registration-label signals.

use crate::config::{ClassifierConfig, ScoringPolicy};
use crate::types::{Category, ClassificationResult, RawOwnerEntry};

pub const NO_HISTORY_REASON: &str = "no ownership history available";
pub const FLEET_OWNER_REASON: &str = "owner type explicitly marked as fleet-owner";
pub const GOVERNMENT_REASON: &str = "government/undercover keyword found";
pub const DEFAULT_REASON: &str = "no fleet or government indicators for current owner";

pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifies the current owner. `label` is the page's registration
    /// label, if one was found.
    pub fn classify(&self, owners: &[RawOwnerEntry], label: Option<&str>) -> ClassificationResult {
        let Some(current) = owners.last() else {
            return self.no_history(label);
        };

        if contains_ci(&current.raw_text, &self.config.fleet_marker) {
            return self.flagged(
                self.config.confidence.fleet_owner,
                self.config.score.flagged,
                vec![FLEET_OWNER_REASON.to_string()],
                current,
            );
        }

        match self.config.policy {
            ScoringPolicy::Fixed => self.classify_fixed(current),
            ScoringPolicy::Weighted => self.classify_weighted(current, label),
        }
    }

    fn classify_fixed(&self, current: &RawOwnerEntry) -> ClassificationResult {
        if let Some(keyword) = find_keyword(&current.raw_text, &self.config.government_keywords) {
            tracing::debug!("Government keyword '{}' in current owner", keyword);
            return self.flagged(
                self.config.confidence.government,
                self.config.score.flagged,
                vec![GOVERNMENT_REASON.to_string()],
                current,
            );
        }
        ClassificationResult {
            category: Category::Private,
            confidence: self.config.confidence.private,
            reasons: vec![DEFAULT_REASON.to_string()],
            score: self.config.score.unflagged,
            last_owner_name: Some(current.normalized_name.clone()),
        }
    }

    fn classify_weighted(&self, current: &RawOwnerEntry, label: Option<&str>) -> ClassificationResult {
        let w = &self.config.weighted;
        let mut points: i32 = 0;
        let mut reasons = Vec::new();

        if let Some(keyword) = find_keyword(&current.raw_text, &self.config.government_keywords) {
            tracing::debug!("Government keyword '{}' in current owner", keyword);
            points = points.saturating_add(w.government_points);
            reasons.push(GOVERNMENT_REASON.to_string());
        } else if let Some(keyword) = find_keyword(&current.raw_text, &self.config.fleet_keywords) {
            points = points.saturating_add(w.fleet_points);
            reasons.push(format!("fleet/lease keyword found: {}", keyword));
        }

        if let Some(label) = label {
            if contains_ci(label, &self.config.generic_label_marker) {
                points = points.saturating_add(w.generic_label_points);
                reasons.push(format!(
                    "registration label is the generic '{}'",
                    self.config.generic_label_marker
                ));
            }
        }

        let max = i64::from(w.max_points.max(1));
        let confidence = (i64::from(points.max(0)) * 100 / max).min(100) as u8;
        let category = if confidence >= w.threshold {
            Category::LikelyFleetOrUndercover
        } else {
            Category::Private
        };
        if reasons.is_empty() {
            reasons.push(DEFAULT_REASON.to_string());
        }

        ClassificationResult {
            category,
            confidence,
            reasons,
            score: points,
            last_owner_name: Some(current.normalized_name.clone()),
        }
    }

    fn no_history(&self, label: Option<&str>) -> ClassificationResult {
        let reason = match label {
            Some(label) => format!("{} ({})", NO_HISTORY_REASON, label),
            None => NO_HISTORY_REASON.to_string(),
        };
        ClassificationResult {
            category: Category::Private,
            confidence: self.config.confidence.no_data,
            reasons: vec![reason],
            score: self.config.score.unflagged,
            last_owner_name: None,
        }
    }

    fn flagged(
        &self,
        confidence: u8,
        score: i32,
        reasons: Vec<String>,
        current: &RawOwnerEntry,
    ) -> ClassificationResult {
        ClassificationResult {
            category: Category::LikelyFleetOrUndercover,
            confidence,
            reasons,
            score,
            last_owner_name: Some(current.normalized_name.clone()),
        }
    }
}

/// Case-insensitive substring test. An empty needle never matches.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn find_keyword<'a>(haystack: &str, keywords: &'a [String]) -> Option<&'a str> {
    let lower = haystack.to_lowercase();
    keywords
        .iter()
        .map(String::as_str)
        .find(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
}
