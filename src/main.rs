use anyhow::Context;
use tracing_subscriber::EnvFilter;

use media_rec_api::api::{create_router, AppState};
use media_rec_api::config::Config;
use media_rec_api::services::ingestion::{self, RawMediaRecord};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);

    if let Some(path) = &config.seed_media_path {
        seed_catalog(&state, path).await?;
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Loads a JSON array of raw media records and ingests it into the catalog.
async fn seed_catalog(state: &AppState, path: &str) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path))?;
    let records: Vec<RawMediaRecord> =
        serde_json::from_str(&raw).with_context(|| format!("Malformed seed file {}", path))?;

    let report = ingestion::ingest_batch(
        state.store.as_ref(),
        &records,
        state.list_delimiter,
        state.storage_timeout,
    )
    .await
    .context("Seed ingestion aborted")?;

    tracing::info!(
        path = %path,
        ingested = report.ingested,
        failed = report.failures.len(),
        "Seed catalog loaded"
    );
    Ok(())
}
