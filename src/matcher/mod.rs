//! Question matching against the FAQ corpus.
//!
//! One [`Matcher`] supports two configuration-selectable algorithms:
//! literal substring containment over normalized questions, and semantic
//! ranking over embeddings with a threshold-based acceptance policy.

pub mod error;
pub mod types;


pub use error::MatchError;
pub use types::{MatchMode, MatchResponse, MatcherConfig};

use std::sync::Arc;

use tracing::{debug, info};

use crate::embedding::EmbeddingProvider;
use crate::normalize::normalize;
use crate::ranking::rank;
use crate::store::RecordStore;

pub use crate::ranking::Candidate;

/// Matches free-text questions against the stored corpus.
pub struct Matcher {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn RecordStore>,
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn RecordStore>,
        config: MatcherConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Answers `question` under the configured mode.
    ///
    /// An empty (or whitespace-only) question is rejected before any
    /// normalization or provider call.
    pub async fn ask(&self, question: &str) -> Result<MatchResponse, MatchError> {
        if question.trim().is_empty() {
            return Err(MatchError::EmptyQuestion);
        }

        let normalized = normalize(question);
        debug!(mode = %self.config.mode, normalized = %normalized, "Matching question");

        match self.config.mode {
            MatchMode::Literal => self.literal_match(&normalized).await,
            MatchMode::Semantic => self.semantic_match(&normalized).await,
        }
    }

    /// Substring containment of the normalized question within each stored
    /// (normalized) question; first match wins. No external calls.
    async fn literal_match(&self, normalized: &str) -> Result<MatchResponse, MatchError> {
        let pairs = self.store.faq_pairs().await?;

        for (stored_question, answer) in pairs {
            if normalize(&stored_question).contains(normalized) {
                return Ok(MatchResponse::literal(answer));
            }
        }

        Ok(MatchResponse::sentinel())
    }

    /// Embeds the normalized question, ranks the embedded corpus, and
    /// accepts iff the best candidate meets the threshold.
    async fn semantic_match(&self, normalized: &str) -> Result<MatchResponse, MatchError> {
        let query = self.embedder.embed(normalized).await?;
        let corpus = self.store.load_embedded().await?;

        if corpus.is_empty() {
            debug!("No embedded corpus entries, returning sentinel");
            return Ok(MatchResponse::sentinel());
        }

        let mut ranked = rank(&query, corpus);

        match ranked.first() {
            Some(best) if best.similarity >= self.config.threshold => {
                info!(
                    best_id = best.id,
                    similarity = best.similarity,
                    "Semantic match accepted"
                );
                ranked.truncate(self.config.top_k);
                Ok(MatchResponse::accepted(ranked))
            }
            Some(best) => {
                debug!(
                    best_id = best.id,
                    similarity = best.similarity,
                    threshold = self.config.threshold,
                    "Best candidate below threshold, returning sentinel"
                );
                Ok(MatchResponse::sentinel())
            }
            None => Ok(MatchResponse::sentinel()),
        }
    }
}
