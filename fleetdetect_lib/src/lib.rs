//! Fleet and undercover-vehicle detection from Finnik vehicle pages.
//!
//! Turns one fetched HTML document into owner-history rows, a summary line,
//! a spec map and a classification of the current owner. Fetching is
//! delegated to a [`DocumentFetcher`]; everything else is synchronous and
//! free of shared state.

pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod types;

pub use finnik_api;

pub use classify::Classifier;
pub use config::{ConfigError, DetectionConfig, ScoringPolicy};
pub use error::{AnalyzeError, FetchError, StructuralParseError};
pub use fetch::DocumentFetcher;
pub use pipeline::{Analyzer, Pipeline};
pub use types::{
    AnalysisRecord, Category, ClassificationResult, RawOwnerEntry, SpecField, SpecMap,
    VehicleSummary,
};
