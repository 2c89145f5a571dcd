//! Ingestion normalizer: turns raw flat records into catalog writes.
//!
//! Ingestion is record-at-a-time and partial-failure tolerant. A bad record
//! is reported and skipped; the batch only aborts when the catalog store
//! itself becomes unavailable.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{MediaId, MediaKind, NewMedia, ReferenceKind};
use crate::store::CatalogStore;

use super::with_storage_timeout;

/// One raw flat record from a source extract: scalar fields plus four
/// delimiter-separated relationship lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMediaRecord {
    pub title: String,
    /// "movie" or "show", any casing
    pub kind: String,
    pub release_year: i32,
    #[serde(default)]
    pub age_certification: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub imdb_score: Option<f64>,
    #[serde(default)]
    pub imdb_votes: Option<u64>,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub directors: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub production_countries: String,
}

/// A raw record reduced to validated catalog writes
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub media: NewMedia,
    pub links: Vec<(ReferenceKind, String)>,
}

/// Outcome of one ingestion batch. Failures are aggregated here instead of
/// failing the batch; an empty `failures` list means every record landed.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IngestionReport {
    pub total: usize,
    pub ingested: usize,
    pub failures: Vec<RecordFailure>,
}

/// One record that could not be ingested, and why
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordFailure {
    /// Position of the record within its batch
    pub index: usize,
    pub title: Option<String>,
    pub reason: String,
}

/// Validates scalar fields and splits the relationship lists of one record.
pub fn normalize_record(record: &RawMediaRecord, delimiter: char) -> AppResult<NormalizedRecord> {
    let kind: MediaKind = record.kind.parse()?;
    let media = NewMedia::new(
        &record.title,
        kind,
        record.release_year,
        record.age_certification.clone(),
        record.runtime,
        record.seasons,
        record.imdb_score,
        record.imdb_votes,
    )?;

    // A rating nobody corroborated is accepted, but worth flagging.
    if media.imdb_score.is_some() && media.imdb_votes.is_none() {
        tracing::warn!(title = %media.title, "IMDb score present without vote count");
    }

    let mut links = Vec::new();
    for (kind, field) in [
        (ReferenceKind::Actor, &record.actors),
        (ReferenceKind::Director, &record.directors),
        (ReferenceKind::Genre, &record.genres),
        (ReferenceKind::ProductionCountry, &record.production_countries),
    ] {
        for token in split_tokens(field, delimiter) {
            links.push((kind, token));
        }
    }

    Ok(NormalizedRecord { media, links })
}

/// Splits a multi-value field on its delimiter, trimming whitespace,
/// discarding empty tokens and deduplicating case-insensitively within the
/// record.
fn split_tokens(field: &str, delimiter: char) -> Vec<String> {
    let mut seen = HashSet::new();
    field
        .split(delimiter)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Normalizes and commits a single record as one atomic catalog write.
pub async fn ingest_record(
    store: &dyn CatalogStore,
    record: &RawMediaRecord,
    delimiter: char,
    timeout: Duration,
) -> AppResult<MediaId> {
    let normalized = normalize_record(record, delimiter)?;
    with_storage_timeout(
        timeout,
        store.commit_record(normalized.media, normalized.links),
    )
    .await
}

/// Ingests a batch of raw records, accumulating per-record failures.
///
/// Only `StorageUnavailable` aborts the batch; every other failure is
/// recorded in the report and ingestion moves to the next record.
pub async fn ingest_batch(
    store: &dyn CatalogStore,
    records: &[RawMediaRecord],
    delimiter: char,
    timeout: Duration,
) -> AppResult<IngestionReport> {
    let mut report = IngestionReport {
        total: records.len(),
        ..Default::default()
    };

    for (index, record) in records.iter().enumerate() {
        match ingest_record(store, record, delimiter, timeout).await {
            Ok(_) => report.ingested += 1,
            Err(err @ AppError::StorageUnavailable(_)) => {
                tracing::error!(index, error = %err, "Catalog store unavailable, aborting batch");
                return Err(err);
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping bad ingestion record");
                let title = record.title.trim();
                report.failures.push(RecordFailure {
                    index,
                    title: (!title.is_empty()).then(|| title.to_string()),
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        total = report.total,
        ingested = report.ingested,
        failed = report.failures.len(),
        "Ingestion batch finished"
    );
    Ok(report)
}
