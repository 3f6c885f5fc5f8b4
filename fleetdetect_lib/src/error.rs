//! Error types for the analysis pipeline.
//!
//! Only two things can fail an analysis: the document could not be fetched,
//! or the markup could not be parsed at all. A page that lacks a history,
//! summary or details region is not an error; the extractors report that as
//! empty or sentinel values.

use thiserror::Error;

/// The source document could not be retrieved. Never retried inside the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to fetch document for {identifier}: {cause}")]
pub struct FetchError {
    pub identifier: String,
    pub cause: String,
}

/// The markup could not be turned into a document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse document: {cause}")]
pub struct StructuralParseError {
    pub cause: String,
}

impl StructuralParseError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// Errors surfaced by [`crate::Analyzer::analyze`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] StructuralParseError),
}
