use std::time::Duration;

use thiserror::Error;

/// Errors from the embedding provider.
///
/// Every variant maps to the same retryable failure class while attempts
/// remain; the error surfaced by
/// [`EmbeddingProvider::embed`](super::EmbeddingProvider::embed) is the last
/// attempt's, and means the provider is unavailable.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("embedding provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("embedding response could not be parsed: {reason}")]
    InvalidResponse { reason: String },

    /// The response parsed but carried no vector (or an empty one).
    /// Treated as a failure rather than silently accepted as empty output.
    #[error("embedding response contained no vector")]
    MissingVector,

    #[error("invalid embedding client configuration: {reason}")]
    InvalidConfig { reason: String },
}
