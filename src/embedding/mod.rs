//! Embedding acquisition.
//!
//! - [`EmbeddingProvider`] is the `text -> vector` seam the matcher and the
//!   vectorizer depend on.
//! - [`GeminiEmbedder`] implements it over the Gemini `embedContent` REST
//!   endpoint with a bounded [`RetryPolicy`].
//! - [`MockEmbedder`] (behind the `mock` feature) scripts outcomes for tests.

mod error;
pub mod gemini;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod retry;


pub use error::EmbeddingError;
pub use gemini::GeminiEmbedder;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use retry::{RetryPolicy, with_retries};

use async_trait::async_trait;

/// Provider abstraction over one remote embedding model.
///
/// An implementation owns its own failure policy; a returned error means the
/// provider is unavailable for this text after any internal retries, and the
/// caller decides whether to skip the item, fail the batch entry, or fail the
/// whole request.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the embedding vector for `text`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Identifier of the model producing the vectors (persisted alongside
    /// embeddings so entries from incompatible models are never compared).
    fn model_id(&self) -> &str;
}
