//! Faqmatch library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`FaqEntry`], [`EmbeddedEntry`] - Corpus records
//! - [`Matcher`], [`MatchResponse`], [`Candidate`] - Question matching
//! - [`Vectorizer`], [`VectorizationReport`] - Corpus (re)embedding
//!
//! ## Embedding
//! - [`EmbeddingProvider`] - Provider abstraction (`text -> vector`)
//! - [`GeminiEmbedder`], [`RetryPolicy`] - Gemini `embedContent` client
//!
//! ## Storage
//! - [`RecordStore`], [`SqliteStore`] - FAQ record access
//!
//! ## Constants
//! Matching and retry defaults are exported for consistency across modules.
//! Prefer overriding them through [`Config`] at runtime.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod matcher;
pub mod normalize;
pub mod ranking;
pub mod store;
pub mod vectorize;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_BACKOFF_MS, DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, NO_ANSWER_SENTINEL,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{EmbeddingError, EmbeddingProvider, GeminiEmbedder, RetryPolicy};
pub use matcher::{Candidate, MatchError, MatchMode, MatchResponse, Matcher, MatcherConfig};
pub use normalize::normalize;
pub use ranking::{cosine_similarity, rank};
#[cfg(any(test, feature = "mock"))]
pub use store::MockRecordStore;
pub use store::{
    EmbeddedEntry, FaqEntry, RecordStore, SqliteStore, StoreError, decode_embedding,
    encode_embedding,
};
pub use vectorize::{VectorizationReport, VectorizeError, VectorizedEntry, Vectorizer};
