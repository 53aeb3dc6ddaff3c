//! HTTP surface of the FAQ matching service.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/chatbot", post(handler::chatbot))
        .route("/faq", get(handler::list_faq))
        .route("/vectorize", post(handler::vectorize_all))
        .route("/vectorize/{id}", post(handler::vectorize_one))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
