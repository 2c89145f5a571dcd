use std::fmt::Display;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Unique identifier for a media item
pub type MediaId = Uuid;

/// Earliest release year the catalog accepts
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// Type of catalog entry (movie or show)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "show" => Ok(MediaKind::Show),
            other => Err(AppError::Validation(format!(
                "Unknown media kind: '{}' (expected 'movie' or 'show')",
                other
            ))),
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

/// A movie or show in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    /// Unique identifier, stable across re-ingestion
    pub id: MediaId,
    pub title: String,
    pub kind: MediaKind,
    pub release_year: i32,
    pub age_certification: Option<String>,
    /// Runtime in minutes; optional for shows
    pub runtime: Option<u32>,
    /// Season count; only meaningful for shows
    pub seasons: Option<u32>,
    /// IMDb score in [0.0, 10.0]; absent when no rating exists
    pub imdb_score: Option<f64>,
    pub imdb_votes: Option<u64>,
}

/// Validated scalar fields for one media item, ready to be upserted.
///
/// Construction through [`NewMedia::new`] is the single place where the
/// catalog's scalar invariants are enforced, so every item the store holds
/// is known to satisfy them.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedia {
    pub title: String,
    pub kind: MediaKind,
    pub release_year: i32,
    pub age_certification: Option<String>,
    pub runtime: Option<u32>,
    pub seasons: Option<u32>,
    pub imdb_score: Option<f64>,
    pub imdb_votes: Option<u64>,
}

/// Latest release year the catalog accepts (titles can be announced ahead)
pub fn max_release_year() -> i32 {
    Utc::now().year() + 2
}

impl NewMedia {
    /// Validates scalar fields and builds an insertable record.
    ///
    /// Fails with [`AppError::Validation`] on an empty title, an implausible
    /// release year, a score outside [0, 10], or a season count on a movie.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        kind: MediaKind,
        release_year: i32,
        age_certification: Option<String>,
        runtime: Option<u32>,
        seasons: Option<u32>,
        imdb_score: Option<f64>,
        imdb_votes: Option<u64>,
    ) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title must not be empty".to_string()));
        }

        let max_year = max_release_year();
        if !(MIN_RELEASE_YEAR..=max_year).contains(&release_year) {
            return Err(AppError::Validation(format!(
                "Release year {} outside plausible range {}..={}",
                release_year, MIN_RELEASE_YEAR, max_year
            )));
        }

        if seasons.is_some() && kind == MediaKind::Movie {
            return Err(AppError::Validation(format!(
                "Movie '{}' carries a season count",
                title
            )));
        }

        if let Some(score) = imdb_score {
            if !score.is_finite() || !(0.0..=10.0).contains(&score) {
                return Err(AppError::Validation(format!(
                    "IMDb score {} outside [0.0, 10.0]",
                    score
                )));
            }
        }

        Ok(Self {
            title: title.to_string(),
            kind,
            release_year,
            age_certification: age_certification.filter(|c| !c.trim().is_empty()),
            runtime,
            seasons,
            imdb_score,
            imdb_votes,
        })
    }

    /// Natural key used to detect the same logical title across ingestion runs
    pub fn natural_key(&self) -> (String, i32, MediaKind) {
        (self.title.clone(), self.release_year, self.kind)
    }
}
