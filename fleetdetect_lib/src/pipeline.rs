//! Orchestration: markup in, [`AnalysisRecord`] out.

use crate::classify::Classifier;
use crate::config::{ConfigError, DetectionConfig};
use crate::document::Document;
use crate::error::{AnalyzeError, FetchError, StructuralParseError};
use crate::extract::{OwnerExtractor, SpecExtractor, SummaryExtractor};
use crate::fetch::DocumentFetcher;
use crate::types::AnalysisRecord;

/// Parses one page and runs every extractor plus the classifier over it.
///
/// Holds only compiled selectors and configuration, so one instance can be
/// shared across threads and reused for any number of documents.
pub struct Pipeline {
    owners: OwnerExtractor,
    summary: SummaryExtractor,
    specs: SpecExtractor,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(config: DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            owners: OwnerExtractor::new(&config.selectors, &config.owners)?,
            summary: SummaryExtractor::new(&config.selectors, &config.summary)?,
            specs: SpecExtractor::new(&config.selectors)?,
            classifier: Classifier::new(config.classifier),
        })
    }

    /// Analyzes already-fetched markup. Fails only when the markup cannot be
    /// parsed at all; missing sections show up as empty or sentinel fields.
    pub fn run(&self, identifier: &str, markup: &str) -> Result<AnalysisRecord, StructuralParseError> {
        let doc = Document::parse(markup)?;

        let owners = self.owners.extract(&doc);
        let vehicle_summary = self.summary.extract(&doc);
        let registration_label = self.summary.registration_label(&doc);
        let specs = self.specs.extract(&doc);
        let classification = self.classifier.classify(&owners, registration_label.as_deref());

        tracing::info!(
            "{}: {} (confidence {}, {} owners)",
            identifier,
            classification.category,
            classification.confidence,
            owners.len()
        );

        Ok(AnalysisRecord {
            identifier: identifier.to_string(),
            vehicle_summary,
            specs,
            owners,
            classification,
            registration_label,
        })
    }
}

/// Fetches a page by identifier and runs the [`Pipeline`] over it.
pub struct Analyzer<F> {
    fetcher: F,
    pipeline: Pipeline,
}

impl<F: DocumentFetcher> Analyzer<F> {
    pub fn new(fetcher: F, pipeline: Pipeline) -> Self {
        Self { fetcher, pipeline }
    }

    /// The identifier is handed to the fetcher unchanged.
    pub async fn analyze(&self, identifier: &str) -> Result<AnalysisRecord, AnalyzeError> {
        let markup = self.fetcher.fetch(identifier).await.map_err(|e| {
            tracing::warn!("Fetch failed for {}: {}", identifier, e);
            FetchError {
                identifier: identifier.to_string(),
                cause: e.to_string(),
            }
        })?;
        Ok(self.pipeline.run(identifier, &markup)?)
    }
}
