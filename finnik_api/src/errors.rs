//! Error types for the document client.

/// Errors that can occur when fetching a vehicle page.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent, or the body could not be read.
    #[error("Request failed: {reason}")]
    RequestFailed { reason: String },
    /// The server answered with a non-success status. `body` is a truncated snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
}
