use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use crate::constants::NO_ANSWER_SENTINEL;
use crate::embedding::{EmbeddingProvider, MockEmbedder};
use crate::matcher::{MatchMode, Matcher, MatcherConfig};
use crate::store::{MockRecordStore, RecordStore};
use crate::vectorize::Vectorizer;

fn test_app(embedder: Arc<MockEmbedder>, store: Arc<MockRecordStore>) -> Router {
    let embedder: Arc<dyn EmbeddingProvider> = embedder;
    let store: Arc<dyn RecordStore> = store;

    let config = MatcherConfig {
        mode: MatchMode::Semantic,
        threshold: 0.7,
        top_k: 3,
    };

    let state = AppState::new(
        Arc::new(Matcher::new(embedder.clone(), store.clone(), config)),
        Arc::new(Vectorizer::new(embedder, store.clone())),
        store,
    );

    router(state)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(
        Arc::new(MockEmbedder::new(2)),
        Arc::new(MockRecordStore::new()),
    );

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_chatbot_accepted_match() {
    let embedder = Arc::new(MockEmbedder::new(2));
    embedder.push_ok(vec![1.0, 0.0]);
    let store = Arc::new(MockRecordStore::new());
    store.add_embedded(1, "¿Cuál es el horario?", "De 9 a 18.", vec![1.0, 0.0]);

    let app = test_app(embedder, store);
    let response = app
        .oneshot(post_json("/chatbot", json!({ "question": "horario" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["accepted"], json!(true));
    assert_eq!(body["answer"], json!("De 9 a 18."));
    assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
    assert!(body["similarity"].as_f64().unwrap() > 0.99);
}

#[tokio::test]
async fn test_chatbot_rejection_carries_sentinel() {
    let embedder = Arc::new(MockEmbedder::new(2));
    embedder.push_ok(vec![1.0, 0.0]);
    let store = Arc::new(MockRecordStore::new());
    store.add_embedded(1, "q", "a", vec![0.0, 1.0]);

    let app = test_app(embedder, store);
    let response = app
        .oneshot(post_json("/chatbot", json!({ "question": "unrelated" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["accepted"], json!(false));
    assert_eq!(body["answer"], json!(NO_ANSWER_SENTINEL));
    assert_eq!(body["similarity"], json!(0.0));
    assert_eq!(body["candidates"], json!([]));
}

#[tokio::test]
async fn test_chatbot_empty_question_is_bad_request() {
    let app = test_app(
        Arc::new(MockEmbedder::new(2)),
        Arc::new(MockRecordStore::new()),
    );

    let response = app
        .oneshot(post_json("/chatbot", json!({ "question": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_chatbot_absent_question_is_bad_request() {
    let app = test_app(
        Arc::new(MockEmbedder::new(2)),
        Arc::new(MockRecordStore::new()),
    );

    let response = app.oneshot(post_json("/chatbot", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chatbot_provider_outage_is_bad_gateway() {
    let embedder = Arc::new(MockEmbedder::new(2));
    embedder.push_err("provider down");
    let store = Arc::new(MockRecordStore::new());
    store.add_embedded(1, "q", "a", vec![1.0, 0.0]);

    let app = test_app(embedder, store);
    let response = app
        .oneshot(post_json("/chatbot", json!({ "question": "anything" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_chatbot_store_failure_is_internal_error() {
    let embedder = Arc::new(MockEmbedder::new(2));
    embedder.push_ok(vec![1.0, 0.0]);
    let store = Arc::new(MockRecordStore::new());
    store.fail_reads();

    let app = test_app(embedder, store);
    let response = app
        .oneshot(post_json("/chatbot", json!({ "question": "anything" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_faq_listing() {
    let store = Arc::new(MockRecordStore::new());
    store.add(1, "q1", "a1");
    store.add(2, "q2", "a2");

    let app = test_app(Arc::new(MockEmbedder::new(2)), store);
    let response = app.oneshot(get("/faq")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!([
            { "question": "q1", "answer": "a1" },
            { "question": "q2", "answer": "a2" }
        ])
    );
}

#[tokio::test]
async fn test_vectorize_single_entry() {
    let embedder = Arc::new(MockEmbedder::new(2));
    embedder.push_ok(vec![0.5, 0.5]);
    let store = Arc::new(MockRecordStore::new());
    store.add(7, "q", "a");

    let app = test_app(embedder, store.clone());
    let response = app.oneshot(post("/vectorize/7")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], json!(7));
    assert_eq!(body["dimension"], json!(2));
    assert!(store.entry(7).unwrap().embedding.is_some());
}

#[tokio::test]
async fn test_vectorize_unknown_entry_is_not_found() {
    let app = test_app(
        Arc::new(MockEmbedder::new(2)),
        Arc::new(MockRecordStore::new()),
    );

    let response = app.oneshot(post("/vectorize/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vectorize_all_reports_partial_failures() {
    let embedder = Arc::new(MockEmbedder::new(2));
    let store = Arc::new(MockRecordStore::new());
    store.add(1, "q1", "a1");
    store.add(2, "q2", "a2");
    embedder.push_err("provider down");
    embedder.push_ok(vec![1.0, 0.0]);

    let app = test_app(embedder, store);
    let response = app.oneshot(post("/vectorize")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "total": 2, "success": 1, "failed": 1, "failed_ids": [1] })
    );
}
