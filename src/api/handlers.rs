use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{
    MediaId, MediaItem, Preference, Recommendation, ReferenceEntity, ReferenceKind, DEFAULT_LIMIT,
};
use crate::services::{ingestion, recommendations, with_storage_timeout};
use crate::services::ingestion::{IngestionReport, RawMediaRecord};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct IngestedMediaResponse {
    pub id: MediaId,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonQuery {
    pub name: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GenreScoreQuery {
    pub genre_type: String,
    pub target_imdb_score: f64,
    pub limit: Option<usize>,
}

// Handlers

/// Ingest a single raw media record
pub async fn create_media(
    State(state): State<AppState>,
    Json(record): Json<RawMediaRecord>,
) -> AppResult<(StatusCode, Json<IngestedMediaResponse>)> {
    let id = ingestion::ingest_record(
        state.store.as_ref(),
        &record,
        state.list_delimiter,
        state.storage_timeout,
    )
    .await?;

    let response = IngestedMediaResponse {
        id,
        title: record.title.trim().to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Ingest a batch of raw media records, returning the per-batch report
pub async fn ingest_media_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<RawMediaRecord>>,
) -> AppResult<Json<IngestionReport>> {
    let report = ingestion::ingest_batch(
        state.store.as_ref(),
        &records,
        state.list_delimiter,
        state.storage_timeout,
    )
    .await?;
    Ok(Json(report))
}

/// Look up a media item by exact title
pub async fn get_media(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<MediaItem>> {
    let media = with_storage_timeout(state.storage_timeout, state.store.get_media_by_title(&title))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Media '{}' not found", title.trim())))?;
    Ok(Json(media))
}

/// Look up a reference entity by kind and descriptor
pub async fn get_reference(
    State(state): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> AppResult<Json<ReferenceEntity>> {
    let kind: ReferenceKind = kind.parse()?;
    let entity = with_storage_timeout(
        state.storage_timeout,
        state.store.get_reference(kind, &name),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", kind, name.trim())))?;
    Ok(Json(entity))
}

/// Run a typed preference request
pub async fn recommend(
    State(state): State<AppState>,
    Json(preference): Json<Preference>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let results =
        recommendations::recommend(state.store.as_ref(), preference, state.storage_timeout).await?;
    Ok(Json(results))
}

/// Recommendations for a person (as actor or director), via query string
pub async fn recommend_by_person(
    State(state): State<AppState>,
    Query(query): Query<PersonQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let results = recommendations::recommend_by_person(
        state.store.as_ref(),
        &query.name,
        query.limit.unwrap_or(DEFAULT_LIMIT),
        state.storage_timeout,
    )
    .await?;
    Ok(Json(results))
}

/// Recommendations for a genre around a target score, via query string
pub async fn recommend_by_genre_score(
    State(state): State<AppState>,
    Query(query): Query<GenreScoreQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let results = recommendations::recommend_by_genre_score(
        state.store.as_ref(),
        &query.genre_type,
        query.target_imdb_score,
        query.limit.unwrap_or(DEFAULT_LIMIT),
        state.storage_timeout,
    )
    .await?;
    Ok(Json(results))
}
