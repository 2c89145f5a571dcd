//! Catalog store: durable, consistent ownership of entities and associations.
//!
//! The store is the only component holding catalog state. It exposes the
//! narrow set of lookups the ingestion and recommendation paths depend on;
//! query operations never mutate, write operations happen only on the
//! ingestion path.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{MediaId, MediaItem, NewMedia, ReferenceEntity, ReferenceId, ReferenceKind};

pub mod memory;

pub use memory::MemoryCatalog;

/// Storage abstraction for the media catalog.
///
/// Implementations must serialize `resolve_or_create_reference` so that two
/// writers racing on the same descriptor cannot create two distinct
/// entities, and must apply `commit_record` as a single atomic unit: no
/// reader observes a media item with a partial association set.
///
/// The store does not retry and carries no timeout of its own; callers wrap
/// store futures in their own deadline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts a media item, or updates the scalar fields of the item with
    /// the same natural key (title, release year, kind) in place.
    /// Returns the stable id either way.
    async fn upsert_media(&self, media: NewMedia) -> AppResult<MediaId>;

    /// Case-insensitive lookup of a descriptor within `kind`, creating the
    /// entity when no match exists. Descriptors differing only in case or
    /// surrounding whitespace resolve to the same id.
    async fn resolve_or_create_reference(
        &self,
        kind: ReferenceKind,
        descriptor: &str,
    ) -> AppResult<ReferenceId>;

    /// Links a media item to a reference entity. Idempotent: inserting an
    /// existing pair is a no-op. Both endpoints must already exist.
    async fn link_association(
        &self,
        media_id: MediaId,
        entity_id: ReferenceId,
        kind: ReferenceKind,
    ) -> AppResult<()>;

    /// Applies one ingestion record as a single atomic unit: resolves every
    /// referenced entity, upserts the media item and links all associations
    /// before any reader can observe the item. Safe to retry: a re-run of a
    /// partially applied record cannot duplicate entities or pairs.
    async fn commit_record(
        &self,
        media: NewMedia,
        links: Vec<(ReferenceKind, String)>,
    ) -> AppResult<MediaId>;

    /// All media items associated, as actor or director, with an entity
    /// whose descriptor case-insensitively matches `person_name`.
    /// Returned in catalog insertion order; empty when nothing matches.
    async fn find_media_by_person(&self, person_name: &str) -> AppResult<Vec<MediaItem>>;

    /// All media items in the given genre whose IMDb score is present and
    /// within `[min_score, max_score]` inclusive, in insertion order.
    /// Fails fast with a validation error when `min_score > max_score`.
    async fn find_media_by_genre_and_score(
        &self,
        genre_type: &str,
        min_score: f64,
        max_score: f64,
    ) -> AppResult<Vec<MediaItem>>;

    /// Looks up a media item by exact (trimmed) title.
    async fn get_media_by_title(&self, title: &str) -> AppResult<Option<MediaItem>>;

    /// Looks up a reference entity by kind and case-insensitive descriptor.
    async fn get_reference(
        &self,
        kind: ReferenceKind,
        descriptor: &str,
    ) -> AppResult<Option<ReferenceEntity>>;
}
