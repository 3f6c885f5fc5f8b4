//! HTTP client for Finnik vehicle pages.

use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// HTTP client for Finnik vehicle pages.
///
/// Each request builds a fresh `reqwest::Client` with a randomized user agent
/// and a 15-second timeout. Failures are reported once; retrying is the
/// caller's business.
pub struct Client {
    /// Base URL of the site. Defaults to `https://finnik.nl`.
    base_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production site.
    pub fn new() -> Self {
        Self::with_base_url("https://finnik.nl")
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the page URL for a registration code. The identifier is passed
    /// through as a single path segment, without format validation.
    pub fn document_url(&self, identifier: &str) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::RequestFailed {
                reason: format!("invalid base URL: {}", e),
            }
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::RequestFailed {
                reason: format!("base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(["kenteken", identifier, "gratis"]);
        url.set_fragment(Some("historie"));
        Ok(url)
    }

    /// Fetches the raw HTML of the vehicle page for `identifier`.
    pub async fn fetch_document(&self, identifier: &str) -> Result<String, Error> {
        let url = self.document_url(identifier)?;
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed {
                    reason: e.to_string(),
                }
            })?;

        tracing::debug!("GET {}", url);
        let resp = client
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "nl-NL,nl;q=0.9,en;q=0.8")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get document: {}", e);
                Error::RequestFailed {
                    reason: e.to_string(),
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed {
                reason: e.to_string(),
            }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
