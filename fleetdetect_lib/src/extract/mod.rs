//! Extractors turning a parsed page into owner rows, a summary and specs.
//!
//! Each extractor is built once from the configuration (selectors compiled up
//! front) and is then a pure function of the [`Document`](crate::document::Document).
//! A missing region is an ordinary outcome: empty vectors, sentinel strings
//! or absent map keys, never an error.

pub mod owners;
pub mod specs;
pub mod summary;

pub use owners::OwnerExtractor;
pub use specs::SpecExtractor;
pub use summary::SummaryExtractor;
