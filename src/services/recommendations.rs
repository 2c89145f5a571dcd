//! Recommendation query engine: rule-based ranking over aggregate popularity
//! signals, dispatched over the closed [`Preference`] set.
//!
//! The engine holds no state of its own; every invocation validates its
//! input, reads the catalog store fresh, ranks with a stable sort and
//! truncates. "No matches" is a successful empty result, never an error.

use std::cmp::Ordering;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::models::{MediaItem, Preference, Recommendation};
use crate::store::CatalogStore;

use super::{format, with_storage_timeout};

/// Half-width of the score window around a genre query's target score
pub const SCORE_WINDOW: f64 = 0.5;

/// Dispatches a preference request to the matching query.
pub async fn recommend(
    store: &dyn CatalogStore,
    preference: Preference,
    timeout: Duration,
) -> AppResult<Vec<Recommendation>> {
    match preference {
        Preference::Person { person_name, limit } => {
            recommend_by_person(store, &person_name, limit, timeout).await
        }
        Preference::GenreScore {
            genre_type,
            center_score,
            limit,
        } => recommend_by_genre_score(store, &genre_type, center_score, limit, timeout).await,
    }
}

/// Media featuring a person as actor or director, best-rated first:
/// descending by IMDb score, vote count breaking ties, catalog insertion
/// order breaking full ties.
pub async fn recommend_by_person(
    store: &dyn CatalogStore,
    person_name: &str,
    limit: usize,
    timeout: Duration,
) -> AppResult<Vec<Recommendation>> {
    let person_name = validated_name(person_name, "person_name")?;
    let limit = validated_limit(limit)?;

    let mut items = with_storage_timeout(timeout, store.find_media_by_person(person_name)).await?;
    items.sort_by(compare_by_score_then_votes);
    items.truncate(limit);

    tracing::info!(person = %person_name, results = items.len(), "Served person recommendation");
    Ok(format::to_recommendations(&items))
}

/// Media in a genre whose score falls within ±[`SCORE_WINDOW`] of the
/// target, most-voted first. The window clamps to the [0, 10] score scale.
pub async fn recommend_by_genre_score(
    store: &dyn CatalogStore,
    genre_type: &str,
    center_score: f64,
    limit: usize,
    timeout: Duration,
) -> AppResult<Vec<Recommendation>> {
    let genre_type = validated_name(genre_type, "genre_type")?;
    let limit = validated_limit(limit)?;
    if !center_score.is_finite() || !(0.0..=10.0).contains(&center_score) {
        return Err(AppError::Validation(format!(
            "center_score {} outside [0.0, 10.0]",
            center_score
        )));
    }

    let min_score = (center_score - SCORE_WINDOW).max(0.0);
    let max_score = (center_score + SCORE_WINDOW).min(10.0);

    let mut items = with_storage_timeout(
        timeout,
        store.find_media_by_genre_and_score(genre_type, min_score, max_score),
    )
    .await?;
    // Score is already range-bounded, so vote count is the only discriminator.
    items.sort_by(|a, b| votes(b).cmp(&votes(a)));
    items.truncate(limit);

    tracing::info!(
        genre = %genre_type,
        min_score,
        max_score,
        results = items.len(),
        "Served genre recommendation"
    );
    Ok(format::to_recommendations(&items))
}

fn validated_limit(limit: usize) -> AppResult<usize> {
    if limit == 0 {
        return Err(AppError::Validation("limit must be positive".to_string()));
    }
    Ok(limit)
}

fn validated_name<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}

fn votes(item: &MediaItem) -> u64 {
    item.imdb_votes.unwrap_or(0)
}

/// Descending by (score, votes). An absent score sorts after every present
/// score regardless of votes; the caller's stable sort keeps insertion
/// order on full ties.
fn compare_by_score_then_votes(a: &MediaItem, b: &MediaItem) -> Ordering {
    let score = |item: &MediaItem| item.imdb_score.unwrap_or(-1.0);
    score(b)
        .total_cmp(&score(a))
        .then_with(|| votes(b).cmp(&votes(a)))
}
