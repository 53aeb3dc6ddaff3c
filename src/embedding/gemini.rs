//! Gemini `embedContent` client.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use super::error::EmbeddingError;
use super::retry::{RetryPolicy, with_retries};
use super::EmbeddingProvider;

/// Embedding client for the Gemini generative language API.
///
/// One `reqwest` client is built at construction with the policy's
/// per-attempt timeout; nothing is re-read or mutated per request.
pub struct GeminiEmbedder {
    http: HttpClient,
    base_url: String,
    model: String,
    api_key: String,
    policy: RetryPolicy,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: RequestContent<'a>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ResponseEmbedding>,
}

#[derive(Deserialize)]
struct ResponseEmbedding {
    // Some API revisions spell the field `value`.
    #[serde(default, alias = "value")]
    values: Vec<f32>,
}

impl GeminiEmbedder {
    /// Creates a client for `base_url` using `model` and `api_key`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self, EmbeddingError> {
        let http = HttpClient::builder()
            .timeout(policy.request_timeout)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let base_url = base_url.into();

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            policy,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url, self.model
        )
    }

    /// One provider call, no retry.
    async fn embed_once(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let body = EmbedContentRequest {
            content: RequestContent {
                parts: vec![RequestPart { text }],
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout {
                        timeout: self.policy.request_timeout,
                    }
                } else {
                    EmbeddingError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let parsed: EmbedContentResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        match parsed.embedding {
            Some(embedding) if !embedding.values.is_empty() => Ok(embedding.values),
            _ => Err(EmbeddingError::MissingVector),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        with_retries(&self.policy, "embedding", || self.embed_once(text)).await
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
