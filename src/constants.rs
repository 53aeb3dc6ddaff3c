//! Cross-cutting, shared defaults.
//!
//! None of these is a proven optimum; all are overridable through
//! [`Config`](crate::config::Config).

/// Minimum cosine similarity for a semantic match to be accepted.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.70;

/// Maximum number of candidates returned on an accepted semantic match.
pub const DEFAULT_TOP_K: usize = 3;

/// Retries beyond the first embedding attempt (3 attempts total).
pub const DEFAULT_MAX_RETRIES: usize = 2;

/// Fixed backoff between embedding attempts.
pub const DEFAULT_BACKOFF_MS: u64 = 500;

/// Per-attempt timeout for one embedding provider call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

/// Embedding model requested from the provider.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

/// Answer returned when no stored question matches.
pub const NO_ANSWER_SENTINEL: &str = "Lo siento, no encontré una respuesta para tu consulta.";
