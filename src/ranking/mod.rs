//! Similarity ranking of corpus entries against a query vector.
//!
//! A linear scan over the corpus, O(n·d) in corpus size and vector
//! dimensionality. At FAQ scale no index is warranted; a corpus large enough
//! to need one could swap an approximate-nearest-neighbor search in behind
//! [`rank`] without changing its contract.


use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::store::EmbeddedEntry;

/// Guards the cosine denominator so degenerate all-zero vectors score ~0
/// instead of dividing by zero.
const COSINE_EPSILON: f32 = 1e-10;

/// One ranked answer, transient per query.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: i64,
    pub answer: String,
    pub similarity: f32,
}

/// Cosine similarity of two equal-length vectors, conceptually in [-1, 1].
///
/// Mismatched lengths and empty vectors score 0; callers that care should
/// filter those out before comparing (as [`rank`] does).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    dot_product / (norm_a * norm_b + COSINE_EPSILON)
}

/// Ranks `corpus` against `query`, descending by cosine similarity.
///
/// Entries whose stored vector length differs from the query's (embedded by
/// an incompatible model, or corrupt) are dropped with a warning rather than
/// failing the whole ranking. Ties keep their input order (the sort is
/// stable). The full ranked sequence is returned; callers choose how many
/// candidates to keep.
pub fn rank(query: &[f32], corpus: Vec<EmbeddedEntry>) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = corpus
        .into_iter()
        .filter_map(|entry| {
            if entry.embedding.len() != query.len() {
                warn!(
                    entry_id = entry.id,
                    expected_dim = query.len(),
                    actual_dim = entry.embedding.len(),
                    "Dropping entry: embedding dimension mismatch"
                );
                return None;
            }

            let similarity = cosine_similarity(query, &entry.embedding);

            Some(Candidate {
                id: entry.id,
                answer: entry.answer,
                similarity,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });

    candidates
}
