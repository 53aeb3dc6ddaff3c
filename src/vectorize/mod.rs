//! Corpus vectorization: computing and persisting question embeddings.

pub mod error;


pub use error::VectorizeError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::embedding::EmbeddingProvider;
use crate::normalize::normalize;
use crate::store::RecordStore;

/// Result of embedding a single entry.
#[derive(Debug, Clone, Serialize)]
pub struct VectorizedEntry {
    pub id: i64,
    /// Length of the persisted vector.
    pub dimension: usize,
    /// Model that produced it.
    pub model: String,
    pub updated_at: DateTime<Utc>,
}

/// Summary of a whole-corpus vectorization run.
#[derive(Debug, Clone, Serialize)]
pub struct VectorizationReport {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// Ids whose embedding could not be computed or persisted, in corpus order.
    pub failed_ids: Vec<i64>,
}

/// Embeds stored questions and writes the vectors back to the store.
pub struct Vectorizer {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn RecordStore>,
}

impl Vectorizer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self { embedder, store }
    }

    /// Embeds one entry's normalized question and persists the vector.
    ///
    /// Re-vectorizing an already-embedded entry overwrites the stored vector,
    /// model, and timestamp.
    pub async fn vectorize_one(&self, id: i64) -> Result<VectorizedEntry, VectorizeError> {
        let question = self
            .store
            .question(id)
            .await?
            .ok_or(VectorizeError::NotFound { id })?;

        let normalized = normalize(&question);
        let vector = self.embedder.embed(&normalized).await?;

        let updated_at = Utc::now();
        let model = self.embedder.model_id().to_string();
        self.store
            .update_embedding(id, &vector, &model, updated_at)
            .await?;

        info!(
            entry_id = id,
            dimension = vector.len(),
            model = %model,
            "Vectorized entry"
        );

        Ok(VectorizedEntry {
            id,
            dimension: vector.len(),
            model,
            updated_at,
        })
    }

    /// Vectorizes every stored entry, sequentially and in id order.
    ///
    /// A failing entry is recorded and skipped; it never aborts the rest of
    /// the batch. Only failure to list the corpus at all is fatal.
    pub async fn vectorize_all(&self) -> Result<VectorizationReport, VectorizeError> {
        let entries = self.store.questions().await?;
        let total = entries.len();

        let mut failed_ids = Vec::new();
        for (id, _) in entries {
            if let Err(err) = self.vectorize_one(id).await {
                warn!(entry_id = id, error = %err, "Vectorization failed for entry");
                failed_ids.push(id);
            }
        }

        let report = VectorizationReport {
            total,
            success: total - failed_ids.len(),
            failed: failed_ids.len(),
            failed_ids,
        };

        info!(
            total = report.total,
            success = report.success,
            failed = report.failed,
            "Corpus vectorization finished"
        );

        Ok(report)
    }
}
