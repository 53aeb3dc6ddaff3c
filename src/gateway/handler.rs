//! Request handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::ApiError;
use super::state::AppState;
use crate::ranking::Candidate;
use crate::vectorize::{VectorizationReport, VectorizedEntry};

#[derive(Debug, Deserialize)]
pub struct ChatbotRequest {
    /// Absent and empty are treated alike and rejected.
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatbotResponse {
    pub accepted: bool,
    pub answer: String,
    /// Best candidate's similarity, `0.0` when nothing was accepted.
    pub similarity: f32,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /chatbot` answers a free-text question.
pub async fn chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatbotRequest>,
) -> Result<Json<ChatbotResponse>, ApiError> {
    let question = request.question.unwrap_or_default();
    let response = state.matcher.ask(&question).await?;

    Ok(Json(ChatbotResponse {
        accepted: response.accepted,
        similarity: response.best_similarity(),
        answer: response.answer,
        candidates: response.candidates,
    }))
}

/// `GET /faq` lists every stored question/answer pair.
pub async fn list_faq(State(state): State<AppState>) -> Result<Json<Vec<FaqItem>>, ApiError> {
    let pairs = state.store.faq_pairs().await?;

    Ok(Json(
        pairs
            .into_iter()
            .map(|(question, answer)| FaqItem { question, answer })
            .collect(),
    ))
}

/// `POST /vectorize` re-embeds the whole corpus.
pub async fn vectorize_all(
    State(state): State<AppState>,
) -> Result<Json<VectorizationReport>, ApiError> {
    let report = state.vectorizer.vectorize_all().await?;
    Ok(Json(report))
}

/// `POST /vectorize/{id}` re-embeds a single entry.
pub async fn vectorize_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VectorizedEntry>, ApiError> {
    let entry = state.vectorizer.vectorize_one(id).await?;
    Ok(Json(entry))
}
