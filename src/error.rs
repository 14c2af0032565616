//! Error Handling Module
//!
//! Internal error type for the parallel search tool. Everything inside the crate
//! returns `Result<T, SearchToolError>`; only the tool boundary turns an error into a
//! [`ParallelSearchError`](crate::types::ParallelSearchError) wire value.
//!
//! # Example
//!
//! ```rust,ignore
//! use siumai_parallel_search::error::SearchToolError;
//! use siumai_parallel_search::types::ParallelSearchErrorKind;
//!
//! let error = SearchToolError::rate_limit(Some(429), "slow down");
//! assert_eq!(error.kind(), ParallelSearchErrorKind::RateLimit);
//! assert_eq!(error.status_code(), Some(429));
//! ```

use thiserror::Error;

use crate::types::ParallelSearchErrorKind;

/// Errors produced while validating, resolving or executing a parallel search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchToolError {
    /// Caller or model supplied malformed or out-of-bound parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parameter resolution reached a state input validation should have prevented
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Provider reported rate limiting
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        status_code: Option<u16>,
        message: String,
    },

    /// Provider (or transport) observed a timeout
    #[error("Timeout: {message}")]
    Timeout {
        status_code: Option<u16>,
        message: String,
    },

    /// Provider reported a failure
    #[error("API error ({}): {message}", status_code.map(|c| c.to_string()).unwrap_or_else(|| "no status".to_string()))]
    ApiError {
        status_code: Option<u16>,
        message: String,
    },

    /// Transport level failure talking to the provider
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Payload could not be encoded or decoded
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A built-in schema failed to compile
    #[error("Schema compilation error: {0}")]
    SchemaCompilation(String),

    /// Anything unclassified
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SearchToolError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn rate_limit(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::RateLimit {
            status_code,
            message: message.into(),
        }
    }

    pub fn timeout(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Timeout {
            status_code,
            message: message.into(),
        }
    }

    pub fn api_error(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::ApiError {
            status_code,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }

    /// Wire taxonomy this error is reported under.
    pub const fn kind(&self) -> ParallelSearchErrorKind {
        match self {
            Self::InvalidInput(_) => ParallelSearchErrorKind::InvalidInput,
            Self::ConfigurationError(_) => ParallelSearchErrorKind::ConfigurationError,
            Self::RateLimit { .. } => ParallelSearchErrorKind::RateLimit,
            Self::Timeout { .. } => ParallelSearchErrorKind::Timeout,
            Self::ApiError { .. } | Self::HttpError(_) => ParallelSearchErrorKind::ApiError,
            Self::JsonError(_) | Self::SchemaCompilation(_) | Self::Unknown(_) => {
                ParallelSearchErrorKind::Unknown
            }
        }
    }

    /// HTTP status code attached to the error, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::RateLimit { status_code, .. }
            | Self::Timeout { status_code, .. }
            | Self::ApiError { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(m)
            | Self::ConfigurationError(m)
            | Self::HttpError(m)
            | Self::JsonError(m)
            | Self::SchemaCompilation(m)
            | Self::Unknown(m) => m,
            Self::RateLimit { message, .. }
            | Self::Timeout { message, .. }
            | Self::ApiError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for SearchToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::Error> for SearchToolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout(err.status().map(|s| s.as_u16()), err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::api_error(Some(status.as_u16()), err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

/// Result type for parallel search operations
pub type Result<T> = std::result::Result<T, SearchToolError>;
