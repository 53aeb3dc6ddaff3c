//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Matching mode is not one of `literal` / `semantic`.
    #[error("invalid matching mode '{value}': expected 'literal' or 'semantic'")]
    InvalidMode { value: String },

    /// Similarity threshold could not be parsed or is outside [-1, 1].
    #[error("invalid similarity threshold '{value}': expected a number in [-1, 1]")]
    InvalidThreshold { value: String },

    /// Result-set size must be at least 1.
    #[error("invalid top-k '{value}': must be at least 1")]
    InvalidTopK { value: usize },

    /// A required environment variable was not set.
    ///
    /// Semantic mode needs a provider credential; everything else has a
    /// graceful default.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
