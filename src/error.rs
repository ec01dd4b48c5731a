//! Error types for Stash API operations.

use thiserror::Error;

/// Errors that can occur during Stash API operations.
#[derive(Debug, Error)]
pub enum StashError {
    /// Configuration is missing or incomplete.
    #[error("Stash configuration required: {0}")]
    ConfigMissing(String),

    /// Entity not found, or a lookup resolved to zero entries.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed with a non-2xx status.
    #[error("Stash API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl StashError {
    /// True for the not-found kind, so callers can branch on missing
    /// entities without matching the full enum.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, StashError::NotFound { .. })
    }
}

/// Result type alias for Stash operations.
pub type Result<T> = core::result::Result<T, StashError>;
