//! Error types for the fetch client.

/// Errors that can occur when fetching a remote resource.
///
/// Callers treat every variant as "upstream unavailable"; the variants only
/// exist so the cause can be reported precisely.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The source could not be turned into an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Network failure: DNS, connect, timeout, or the body could not be read.
    #[error("request failed: {0}")]
    RequestFailed(String),
    /// The server answered with a non-success status. `body` is truncated.
    #[error("request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A JSON endpoint returned something that is not JSON.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl Error {
    /// Upstream HTTP status, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
