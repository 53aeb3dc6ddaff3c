//! In-memory record store for tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::error::StoreError;
use super::{EmbeddedEntry, FaqEntry, RecordStore};

/// Test double for [`RecordStore`] backed by a `BTreeMap` (id order falls
/// out of iteration).
#[derive(Default)]
pub struct MockRecordStore {
    entries: RwLock<BTreeMap<i64, FaqEntry>>,
    fail_reads: RwLock<bool>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record without an embedding.
    pub fn add(&self, id: i64, question: &str, answer: &str) {
        self.entries.write().insert(
            id,
            FaqEntry {
                id,
                question: question.to_string(),
                answer: answer.to_string(),
                embedding: None,
                embedding_model: None,
                embedding_updated_at: None,
            },
        );
    }

    /// Adds a record carrying an embedding.
    pub fn add_embedded(&self, id: i64, question: &str, answer: &str, embedding: Vec<f32>) {
        self.entries.write().insert(
            id,
            FaqEntry {
                id,
                question: question.to_string(),
                answer: answer.to_string(),
                embedding: Some(embedding),
                embedding_model: Some("mock-embedding".to_string()),
                embedding_updated_at: Some(Utc::now()),
            },
        );
    }

    /// Makes every read operation fail (corpus unreadable).
    pub fn fail_reads(&self) {
        *self.fail_reads.write() = true;
    }

    /// Snapshot of one record.
    pub fn entry(&self, id: i64) -> Option<FaqEntry> {
        self.entries.read().get(&id).cloned()
    }

    fn check_readable(&self) -> Result<(), StoreError> {
        if *self.fail_reads.read() {
            return Err(StoreError::Query(rusqlite::Error::InvalidQuery));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn load_embedded(&self) -> Result<Vec<EmbeddedEntry>, StoreError> {
        self.check_readable()?;
        Ok(self
            .entries
            .read()
            .values()
            .filter_map(|e| {
                e.embedding.clone().map(|embedding| EmbeddedEntry {
                    id: e.id,
                    answer: e.answer.clone(),
                    embedding,
                })
            })
            .collect())
    }

    async fn question(&self, id: i64) -> Result<Option<String>, StoreError> {
        self.check_readable()?;
        Ok(self.entries.read().get(&id).map(|e| e.question.clone()))
    }

    async fn questions(&self) -> Result<Vec<(i64, String)>, StoreError> {
        self.check_readable()?;
        Ok(self
            .entries
            .read()
            .values()
            .map(|e| (e.id, e.question.clone()))
            .collect())
    }

    async fn faq_pairs(&self) -> Result<Vec<(String, String)>, StoreError> {
        self.check_readable()?;
        Ok(self
            .entries
            .read()
            .values()
            .map(|e| (e.question.clone(), e.answer.clone()))
            .collect())
    }

    async fn update_embedding(
        &self,
        id: i64,
        embedding: &[f32],
        model: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let entry = entries
            .get_mut(&id)
            .ok_or(StoreError::RowNotFound { id })?;

        entry.embedding = Some(embedding.to_vec());
        entry.embedding_model = Some(model.to_string());
        entry.embedding_updated_at = Some(updated_at);
        Ok(())
    }
}
