//! Error types
//!
//! Only the fetch boundary and configuration loading can fail. Structural
//! absence in a document is never an error; it is reported as a missing
//! value in the extraction result.

use thiserror::Error;

/// Failure fetching a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Failure loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no fields configured")]
    NoFields,

    #[error("field '{0}' is configured more than once")]
    DuplicateField(String),
}
