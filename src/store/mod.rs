//! FAQ record store access.
//!
//! The corpus itself is owned by an external administrative process; this
//! core only reads records and writes their embedding-related fields.
//! [`RecordStore`] is the seam, [`SqliteStore`] the production
//! implementation, and embeddings are persisted as little-endian f32 blobs
//! via [`encode_embedding`] / [`decode_embedding`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod sqlite;


pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRecordStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One corpus record as stored.
#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub embedding: Option<Vec<f32>>,
    pub embedding_model: Option<String>,
    pub embedding_updated_at: Option<DateTime<Utc>>,
}

/// Projection of a record that carries a decoded embedding, as consumed by
/// the ranker.
#[derive(Debug, Clone)]
pub struct EmbeddedEntry {
    pub id: i64,
    pub answer: String,
    pub embedding: Vec<f32>,
}

/// Record store operations the matching core needs.
///
/// Each method is a suspension point; per-row updates are assumed atomic at
/// the store boundary.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All entries holding a decodable embedding. Rows whose stored blob
    /// cannot be decoded are reported as having no embedding (logged by the
    /// implementation, never fatal).
    async fn load_embedded(&self) -> Result<Vec<EmbeddedEntry>, StoreError>;

    /// One entry's question text, `None` if the id does not exist.
    async fn question(&self, id: i64) -> Result<Option<String>, StoreError>;

    /// All `(id, question)` pairs, in id order.
    async fn questions(&self) -> Result<Vec<(i64, String)>, StoreError>;

    /// All `(question, answer)` pairs, in id order.
    async fn faq_pairs(&self) -> Result<Vec<(String, String)>, StoreError>;

    /// Persists `(embedding, model, updated_at)` for one entry as a single
    /// update. Fails with [`StoreError::RowNotFound`] if the id does not
    /// exist.
    async fn update_embedding(
        &self,
        id: i64,
        embedding: &[f32],
        model: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Serializes an embedding as little-endian f32 bytes.
pub fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Deserializes little-endian f32 bytes; `None` if the blob is not a whole
/// number of floats.
pub fn decode_embedding(bytes: &[u8]) -> Option<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return None;
    }

    Some(
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}
