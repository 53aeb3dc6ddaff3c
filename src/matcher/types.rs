use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, NO_ANSWER_SENTINEL};
use crate::ranking::Candidate;

/// Which matching algorithm [`Matcher`](super::Matcher) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Substring containment over normalized questions, no external calls.
    Literal,
    /// Embedding-based cosine ranking with threshold acceptance.
    Semantic,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "semantic" => Ok(Self::Semantic),
            other => Err(format!(
                "unknown match mode '{other}', expected 'literal' or 'semantic'"
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

/// Tunables for one matcher instance.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub mode: MatchMode,
    /// Minimum best-candidate similarity for acceptance, compared with `>=`.
    pub threshold: f32,
    /// Number of ranked candidates returned on acceptance.
    pub top_k: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::Semantic,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Outcome of one question match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// Whether a stored answer was deemed good enough.
    pub accepted: bool,
    /// The best answer on acceptance, the fixed sentinel otherwise.
    pub answer: String,
    /// Ranked candidates, best first. Empty for literal hits and rejections.
    pub candidates: Vec<Candidate>,
}

impl MatchResponse {
    /// Accepted semantic match; `candidates` must be non-empty, best first.
    pub fn accepted(candidates: Vec<Candidate>) -> Self {
        let answer = candidates
            .first()
            .map(|c| c.answer.clone())
            .unwrap_or_else(|| NO_ANSWER_SENTINEL.to_string());

        Self {
            accepted: true,
            answer,
            candidates,
        }
    }

    /// Accepted literal match.
    pub fn literal(answer: String) -> Self {
        Self {
            accepted: true,
            answer,
            candidates: Vec::new(),
        }
    }

    /// No acceptable answer; carries the fixed sentinel text.
    pub fn sentinel() -> Self {
        Self {
            accepted: false,
            answer: NO_ANSWER_SENTINEL.to_string(),
            candidates: Vec::new(),
        }
    }

    /// Best similarity, `0.0` when there are no candidates.
    pub fn best_similarity(&self) -> f32 {
        self.candidates.first().map(|c| c.similarity).unwrap_or(0.0)
    }
}
