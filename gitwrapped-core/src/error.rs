//! Error types for gitwrapped-core

use thiserror::Error;

/// Main error type for the gitwrapped-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Structurally invalid feed: missing fields, negative counts, bad dates
    #[error("malformed feed: {0}")]
    MalformedFeed(String),

    /// Statistics requested on a series with no days
    #[error("statistics requested on an empty contribution series")]
    DivisionByEmptySeries,

    /// The contribution data provider failed
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider does not know the requested user
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The dashboard request itself is unusable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gitwrapped-core
pub type Result<T> = std::result::Result<T, Error>;
