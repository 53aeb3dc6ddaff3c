use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::store::StoreError;

/// Errors surfaced by [`Matcher::ask`](super::Matcher::ask).
///
/// Variants stay distinguishable so an HTTP-facing caller can choose status
/// codes without this core knowing about HTTP.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Missing or empty question; user-correctable, never retried.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The embedding provider exhausted its retries.
    #[error("embedding provider unavailable: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The corpus could not be read.
    #[error("record store failed: {0}")]
    Store(#[from] StoreError),
}
