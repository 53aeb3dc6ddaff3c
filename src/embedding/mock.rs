//! Scriptable in-memory embedding provider for tests.

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::EmbeddingProvider;

/// Test double for [`EmbeddingProvider`].
///
/// Unscripted calls return a deterministic vector derived from the text's
/// hash, so equal texts always embed equally. Scripted outcomes (pushed with
/// [`push_ok`](MockEmbedder::push_ok) / [`push_err`](MockEmbedder::push_err))
/// are consumed first, in order.
pub struct MockEmbedder {
    dim: usize,
    model: String,
    script: Mutex<VecDeque<Result<Vec<f32>, String>>>,
    calls: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            model: "mock-embedding".to_string(),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful outcome for the next call.
    pub fn push_ok(&self, vector: Vec<f32>) {
        self.script.lock().push_back(Ok(vector));
    }

    /// Queues a failed outcome for the next call.
    pub fn push_err(&self, reason: impl Into<String>) {
        self.script.lock().push_back(Err(reason.into()));
    }

    /// Number of `embed` calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Texts passed to `embed`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// The vector unscripted calls produce for `text`.
    pub fn deterministic_vector(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();

        (0..self.dim)
            .map(|i| {
                let bit = (hash >> (i % 64)) & 1;
                if bit == 1 { 1.0 } else { -1.0 }
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());

        match self.script.lock().pop_front() {
            Some(Ok(vector)) => Ok(vector),
            Some(Err(reason)) => Err(EmbeddingError::RequestFailed { reason }),
            None => Ok(self.deterministic_vector(text)),
        }
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
