use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::matcher::MatchError;
use crate::store::StoreError;
use crate::vectorize::VectorizeError;

/// Error type returned by HTTP handlers.
///
/// Maps domain errors onto status codes: bad input is the caller's fault
/// (400/404), an unreachable embedding provider is an upstream failure (502),
/// and store failures are ours (500).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Vectorize(#[from] VectorizeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Match(MatchError::EmptyQuestion) => StatusCode::BAD_REQUEST,
            Self::Match(MatchError::Embedding(_)) | Self::Vectorize(VectorizeError::Embedding(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Vectorize(VectorizeError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Match(MatchError::Store(_))
            | Self::Vectorize(VectorizeError::Store(_))
            | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
