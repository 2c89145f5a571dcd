use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Ingestion (write path)
        .route("/media", post(handlers::create_media))
        .route("/media/batch", post(handlers::ingest_media_batch))
        // Catalog lookups
        .route("/media/:title", get(handlers::get_media))
        .route("/references/:kind/:name", get(handlers::get_reference))
        // Recommendations (read path)
        .route("/recommendations", post(handlers::recommend))
        .route("/recommendations/person", get(handlers::recommend_by_person))
        .route(
            "/recommendations/genre-target-score",
            get(handlers::recommend_by_genre_score),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
