//! Error types for fetching remote records.

use std::path::PathBuf;

use flora_output::OutputError;
use thiserror::Error;

/// Errors that can occur while fetching or storing records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON.
    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::FetchConfig`].
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Reading inputs or writing outputs failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl FetchError {
    pub(crate) fn network(url: &str, err: &reqwest::Error) -> Self {
        Self::Network {
            url: crate::client::redact(url),
            message: err.to_string(),
        }
    }

    pub(crate) fn json(url: &str, source: serde_json::Error) -> Self {
        Self::Json {
            url: crate::client::redact(url),
            source,
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
