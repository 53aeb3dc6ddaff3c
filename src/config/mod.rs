//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `FAQMATCH_*` environment variables.
//! Configuration is loaded once at startup and passed explicitly to the
//! components that need it; nothing re-reads the environment per request.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BACKOFF_MS, DEFAULT_EMBEDDING_MODEL, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K,
};
use crate::embedding::RetryPolicy;
use crate::matcher::{MatchMode, MatcherConfig};

/// Default Gemini endpoint used when `FAQMATCH_GEMINI_BASE_URL` is not set.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FAQMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `3000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Path of the SQLite FAQ database. Default: `./faq.db`.
    pub db_path: PathBuf,

    /// Matching mode (`literal` or `semantic`). Default: `semantic`.
    pub mode: MatchMode,

    /// Gemini API key. Required when `mode` is `semantic`.
    pub gemini_api_key: Option<String>,

    /// Gemini endpoint base URL (overridable for tests).
    pub gemini_base_url: String,

    /// Embedding model identifier. Default: `embedding-001`.
    pub embedding_model: String,

    /// Acceptance threshold on the best candidate's cosine similarity.
    pub similarity_threshold: f32,

    /// Candidates returned on an accepted semantic match.
    pub top_k: usize,

    /// Embedding retries beyond the first attempt.
    pub embed_retries: usize,

    /// Fixed backoff between embedding attempts, in milliseconds.
    pub embed_backoff_ms: u64,

    /// Per-attempt embedding request timeout, in seconds.
    pub embed_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            db_path: PathBuf::from("./faq.db"),
            mode: MatchMode::Semantic,
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            embed_retries: DEFAULT_MAX_RETRIES,
            embed_backoff_ms: DEFAULT_BACKOFF_MS,
            embed_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "FAQMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "FAQMATCH_BIND_ADDR";
    const ENV_DB_PATH: &'static str = "FAQMATCH_DB_PATH";
    const ENV_MODE: &'static str = "FAQMATCH_MODE";
    const ENV_GEMINI_API_KEY: &'static str = "FAQMATCH_GEMINI_API_KEY";
    const ENV_GEMINI_BASE_URL: &'static str = "FAQMATCH_GEMINI_BASE_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "FAQMATCH_EMBEDDING_MODEL";
    const ENV_SIMILARITY_THRESHOLD: &'static str = "FAQMATCH_SIMILARITY_THRESHOLD";
    const ENV_TOP_K: &'static str = "FAQMATCH_TOP_K";
    const ENV_EMBED_RETRIES: &'static str = "FAQMATCH_EMBED_RETRIES";
    const ENV_EMBED_BACKOFF_MS: &'static str = "FAQMATCH_EMBED_BACKOFF_MS";
    const ENV_EMBED_TIMEOUT_SECS: &'static str = "FAQMATCH_EMBED_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let db_path = Self::parse_path_from_env(Self::ENV_DB_PATH, defaults.db_path);
        let mode = Self::parse_mode_from_env(defaults.mode)?;
        let gemini_api_key = Self::parse_optional_string_from_env(Self::ENV_GEMINI_API_KEY);
        let gemini_base_url =
            Self::parse_string_from_env(Self::ENV_GEMINI_BASE_URL, defaults.gemini_base_url);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let similarity_threshold = Self::parse_threshold_from_env(defaults.similarity_threshold)?;
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k);
        let embed_retries =
            Self::parse_usize_from_env(Self::ENV_EMBED_RETRIES, defaults.embed_retries);
        let embed_backoff_ms =
            Self::parse_u64_from_env(Self::ENV_EMBED_BACKOFF_MS, defaults.embed_backoff_ms);
        let embed_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_EMBED_TIMEOUT_SECS, defaults.embed_timeout_secs);

        Ok(Self {
            port,
            bind_addr,
            db_path,
            mode,
            gemini_api_key,
            gemini_base_url,
            embedding_model,
            similarity_threshold,
            top_k,
            embed_retries,
            embed_backoff_ms,
            embed_timeout_secs,
        })
    }

    /// Validates cross-field invariants (does not touch the filesystem).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == MatchMode::Semantic && self.gemini_api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_GEMINI_API_KEY,
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK { value: self.top_k });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Retry policy for the embedding client, derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.embed_retries,
            backoff: Duration::from_millis(self.embed_backoff_ms),
            request_timeout: Duration::from_secs(self.embed_timeout_secs),
        }
    }

    /// Matcher tunables derived from this configuration.
    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            mode: self.mode,
            threshold: self.similarity_threshold,
            top_k: self.top_k,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_mode_from_env(default: MatchMode) -> Result<MatchMode, ConfigError> {
        match env::var(Self::ENV_MODE) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidMode { value }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_SIMILARITY_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 =
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidThreshold {
                            value: value.clone(),
                        })?;

                if !(-1.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> usize {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
