//! Inventory API error types.

use thiserror::Error;
use trap_config::ConfigError;
use trap_core::CoreError;

/// Errors that can occur when talking to the inventory API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint could not be reached at all (connection refused, DNS).
    /// This is the only error the fallback endpoint recovers from.
    #[error("cannot reach {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Response metadata or body could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Page size, URLs or headers are not usable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A fetched item does not have the shape of its collection.
    #[error(transparent)]
    Record(#[from] CoreError),
}

impl ApiError {
    /// Whether the fallback endpoint should be tried.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Map a transport error for `url` onto the taxonomy above.
    pub(crate) fn from_transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_connect() {
            Self::Connectivity {
                url: url.to_string(),
                source,
            }
        } else if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Http(source)
        }
    }
}
