use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::store::StoreError;

/// Errors from single-entry or whole-corpus vectorization.
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// The requested entry id does not exist.
    #[error("no FAQ entry with id {id}")]
    NotFound { id: i64 },

    /// The embedding provider exhausted its retries.
    #[error("embedding provider unavailable: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Reading or writing the store failed.
    #[error("record store failed: {0}")]
    Store(#[from] StoreError),
}
