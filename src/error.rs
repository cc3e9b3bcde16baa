//! Error types for article fetching.
//!
//! Every variant displays the same generic message so transport internals
//! never reach the UI. The underlying cause is kept for logging via
//! [`FetchError::detail`] and [`std::error::Error::source`].

/// Message shown to the user for any failed fetch.
pub const FETCH_FAILED: &str = "Failed to fetch articles";

/// Errors raised by the article search client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("{}", FETCH_FAILED)]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{}", FETCH_FAILED)]
    Status(u16),

    /// The body did not match the expected response shape.
    #[error("{}", FETCH_FAILED)]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Diagnostic description of the cause, for logs only.
    pub fn detail(&self) -> String {
        match self {
            Self::Transport(e) => format!("transport error: {e}"),
            Self::Status(code) => format!("unexpected HTTP status {code}"),
            Self::Decode(e) => format!("malformed response body: {e}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
