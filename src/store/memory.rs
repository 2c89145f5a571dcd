use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    fold_descriptor, MediaId, MediaItem, MediaKind, NewMedia, ReferenceEntity, ReferenceId,
    ReferenceKind,
};

use super::CatalogStore;

/// In-memory catalog: plain value types behind a single reader-writer lock.
///
/// Entities live in per-kind tables keyed by their folded descriptor;
/// associations are explicit `(media, entity)` pair sets, one per kind.
/// Media insertion order is tracked so query results have a deterministic
/// base order before ranking.
pub struct MemoryCatalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Default)]
struct CatalogInner {
    media: HashMap<MediaId, MediaItem>,
    /// Ids in the order items were first inserted; the stable tie-break base
    media_order: Vec<MediaId>,
    natural_keys: HashMap<(String, i32, MediaKind), MediaId>,
    references: HashMap<ReferenceKind, ReferenceTable>,
    associations: HashMap<ReferenceKind, HashSet<(MediaId, ReferenceId)>>,
}

#[derive(Default)]
struct ReferenceTable {
    next_id: ReferenceId,
    by_fold: HashMap<String, ReferenceId>,
    entities: HashMap<ReferenceId, ReferenceEntity>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CatalogInner::default()),
        }
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogInner {
    fn upsert_media(&mut self, media: NewMedia) -> MediaId {
        let key = media.natural_key();
        if let Some(&id) = self.natural_keys.get(&key) {
            // Same logical title: update scalar fields in place, keep the id
            // and the original insertion position.
            let existing = self
                .media
                .get_mut(&id)
                .unwrap_or_else(|| unreachable!("natural key index points at a live item"));
            existing.age_certification = media.age_certification;
            existing.runtime = media.runtime;
            existing.seasons = media.seasons;
            existing.imdb_score = media.imdb_score;
            existing.imdb_votes = media.imdb_votes;
            return id;
        }

        let id = Uuid::new_v4();
        self.media.insert(
            id,
            MediaItem {
                id,
                title: media.title,
                kind: media.kind,
                release_year: media.release_year,
                age_certification: media.age_certification,
                runtime: media.runtime,
                seasons: media.seasons,
                imdb_score: media.imdb_score,
                imdb_votes: media.imdb_votes,
            },
        );
        self.media_order.push(id);
        self.natural_keys.insert(key, id);
        id
    }

    fn resolve_or_create(&mut self, kind: ReferenceKind, descriptor: &str) -> AppResult<ReferenceId> {
        let fold = fold_descriptor(descriptor);
        if fold.is_empty() {
            return Err(AppError::Validation(format!(
                "Empty descriptor for reference kind '{}'",
                kind
            )));
        }

        let table = self.references.entry(kind).or_default();
        if let Some(&id) = table.by_fold.get(&fold) {
            return Ok(id);
        }

        table.next_id += 1;
        let id = table.next_id;
        table.by_fold.insert(fold, id);
        table.entities.insert(
            id,
            ReferenceEntity {
                id,
                kind,
                descriptor: descriptor.trim().to_string(),
            },
        );
        Ok(id)
    }

    fn link(&mut self, media_id: MediaId, entity_id: ReferenceId, kind: ReferenceKind) -> AppResult<()> {
        if !self.media.contains_key(&media_id) {
            return Err(AppError::Validation(format!(
                "Cannot link unknown media item {}",
                media_id
            )));
        }
        let known_entity = self
            .references
            .get(&kind)
            .is_some_and(|t| t.entities.contains_key(&entity_id));
        if !known_entity {
            return Err(AppError::Validation(format!(
                "Cannot link unknown {} entity {}",
                kind, entity_id
            )));
        }

        // Duplicate pairs collapse here, which is what makes ingestion retries safe.
        self.associations
            .entry(kind)
            .or_default()
            .insert((media_id, entity_id));
        Ok(())
    }

    fn reference_id(&self, kind: ReferenceKind, descriptor: &str) -> Option<ReferenceId> {
        self.references
            .get(&kind)
            .and_then(|t| t.by_fold.get(&fold_descriptor(descriptor)))
            .copied()
    }

    fn pair_set(&self, kind: ReferenceKind) -> Option<&HashSet<(MediaId, ReferenceId)>> {
        self.associations.get(&kind)
    }

    /// Media ids linked to `entity_id` through `kind`, in insertion order.
    fn media_linked_to(&self, kind: ReferenceKind, entity_id: ReferenceId) -> Vec<MediaId> {
        let Some(pairs) = self.pair_set(kind) else {
            return Vec::new();
        };
        self.media_order
            .iter()
            .copied()
            .filter(|&media_id| pairs.contains(&(media_id, entity_id)))
            .collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn upsert_media(&self, media: NewMedia) -> AppResult<MediaId> {
        let mut inner = self.inner.write().await;
        Ok(inner.upsert_media(media))
    }

    async fn resolve_or_create_reference(
        &self,
        kind: ReferenceKind,
        descriptor: &str,
    ) -> AppResult<ReferenceId> {
        let mut inner = self.inner.write().await;
        inner.resolve_or_create(kind, descriptor)
    }

    async fn link_association(
        &self,
        media_id: MediaId,
        entity_id: ReferenceId,
        kind: ReferenceKind,
    ) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.link(media_id, entity_id, kind)
    }

    async fn commit_record(
        &self,
        media: NewMedia,
        links: Vec<(ReferenceKind, String)>,
    ) -> AppResult<MediaId> {
        // One write-lock acquisition is the transaction boundary: readers see
        // either nothing or the item with its full association set.
        let mut inner = self.inner.write().await;

        let mut resolved = Vec::with_capacity(links.len());
        for (kind, descriptor) in &links {
            resolved.push((*kind, inner.resolve_or_create(*kind, descriptor)?));
        }

        let media_id = inner.upsert_media(media);
        for (kind, entity_id) in resolved {
            inner.link(media_id, entity_id, kind)?;
        }
        Ok(media_id)
    }

    async fn find_media_by_person(&self, person_name: &str) -> AppResult<Vec<MediaItem>> {
        let inner = self.inner.read().await;

        let mut matched: HashSet<MediaId> = HashSet::new();
        for kind in [ReferenceKind::Actor, ReferenceKind::Director] {
            if let Some(entity_id) = inner.reference_id(kind, person_name) {
                matched.extend(inner.media_linked_to(kind, entity_id));
            }
        }

        Ok(inner
            .media_order
            .iter()
            .filter(|id| matched.contains(*id))
            .map(|id| inner.media[id].clone())
            .collect())
    }

    async fn find_media_by_genre_and_score(
        &self,
        genre_type: &str,
        min_score: f64,
        max_score: f64,
    ) -> AppResult<Vec<MediaItem>> {
        if min_score > max_score {
            return Err(AppError::Validation(format!(
                "Score range inverted: {} > {}",
                min_score, max_score
            )));
        }

        let inner = self.inner.read().await;
        let Some(entity_id) = inner.reference_id(ReferenceKind::Genre, genre_type) else {
            return Ok(Vec::new());
        };

        Ok(inner
            .media_linked_to(ReferenceKind::Genre, entity_id)
            .into_iter()
            .map(|id| &inner.media[&id])
            .filter(|item| {
                item.imdb_score
                    .is_some_and(|score| (min_score..=max_score).contains(&score))
            })
            .cloned()
            .collect())
    }

    async fn get_media_by_title(&self, title: &str) -> AppResult<Option<MediaItem>> {
        let inner = self.inner.read().await;
        let title = title.trim();
        Ok(inner
            .media_order
            .iter()
            .map(|id| &inner.media[id])
            .find(|item| item.title == title)
            .cloned())
    }

    async fn get_reference(
        &self,
        kind: ReferenceKind,
        descriptor: &str,
    ) -> AppResult<Option<ReferenceEntity>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reference_id(kind, descriptor)
            .and_then(|id| inner.references.get(&kind).and_then(|t| t.entities.get(&id)))
            .cloned())
    }
}
