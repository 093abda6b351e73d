//! Error types for the healthcheck
//!
//! Probe failures are deliberately absent: they are absorbed into a
//! [`HealthVerdict`](crate::model::HealthVerdict) and never surface as errors.

use thiserror::Error;

/// Result type alias for healthcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the healthcheck
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The record set to reconcile does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// More than one record set matched the name/type lookup
    #[error("Only expected 1 record set for {name}, got {count}")]
    AmbiguousRecord {
        /// Record name that was looked up
        name: String,
        /// Number of record sets returned
        count: usize,
    },

    /// The configured rrdatas share nothing with the record's rrdatas
    #[error("No intersection between given rrdatas {configured:?} and record's rrdatas {observed:?}")]
    NoIntersection {
        /// Operator-supplied rrdatas
        configured: Vec<String>,
        /// Rrdatas currently in the record set
        observed: Vec<String>,
    },

    /// DNS provider-related errors
    #[error("DNS provider error: {0}")]
    DnsProvider(String),

    /// HTTP client errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a DNS provider error
    pub fn dns_provider(msg: impl Into<String>) -> Self {
        Self::DnsProvider(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether the error means the record on the provider does not match
    /// what the operator configured (missing, ambiguous, or disjoint).
    ///
    /// These abort the run before any probe is sent.
    pub fn is_config_mismatch(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::AmbiguousRecord { .. } | Self::NoIntersection { .. }
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
