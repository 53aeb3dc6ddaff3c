use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use faqmatch::config::Config;
use faqmatch::embedding::{EmbeddingProvider, GeminiEmbedder};
use faqmatch::gateway::{self, AppState};
use faqmatch::matcher::Matcher;
use faqmatch::store::{RecordStore, SqliteStore};
use faqmatch::vectorize::Vectorizer;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    info!(
        addr = %config.socket_addr(),
        mode = %config.mode,
        db = %config.db_path.display(),
        model = %config.embedding_model,
        "Starting faqmatch"
    );

    let store: Arc<dyn RecordStore> = Arc::new(
        SqliteStore::open(&config.db_path)
            .with_context(|| format!("opening database at {}", config.db_path.display()))?,
    );

    // In literal mode no key is configured and the client is never called.
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(
        GeminiEmbedder::new(
            &config.gemini_base_url,
            &config.embedding_model,
            config.gemini_api_key.clone().unwrap_or_default(),
            config.retry_policy(),
        )
        .context("building embedding client")?,
    );

    let matcher = Arc::new(Matcher::new(
        embedder.clone(),
        store.clone(),
        config.matcher_config(),
    ));
    let vectorizer = Arc::new(Vectorizer::new(embedder, store.clone()));

    let app = gateway::router(AppState::new(matcher, vectorizer, store));

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("binding {}", config.socket_addr()))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => tracing::error!(error = %err, "Failed to listen for shutdown signal"),
    }
}
