//! The seam between the pipeline and whatever retrieves the raw page.

use std::fmt::Display;
use std::future::Future;

/// Retrieves raw markup for an identifier.
///
/// Implementations report failure once; the pipeline surfaces it as a
/// [`FetchError`](crate::FetchError) without retrying.
pub trait DocumentFetcher {
    type Error: Display;

    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl DocumentFetcher for finnik_api::Client {
    type Error = finnik_api::Error;

    fn fetch(&self, identifier: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        self.fetch_document(identifier)
    }
}
