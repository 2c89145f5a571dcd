use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Unique identifier for a reference entity within its kind
pub type ReferenceId = u32;

/// The four normalized entity kinds media items link to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Actor,
    Director,
    Genre,
    ProductionCountry,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 4] = [
        ReferenceKind::Actor,
        ReferenceKind::Director,
        ReferenceKind::Genre,
        ReferenceKind::ProductionCountry,
    ];
}

impl FromStr for ReferenceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actor" => Ok(ReferenceKind::Actor),
            "director" => Ok(ReferenceKind::Director),
            "genre" => Ok(ReferenceKind::Genre),
            "production_country" => Ok(ReferenceKind::ProductionCountry),
            other => Err(AppError::Validation(format!(
                "Unknown reference kind: '{}'",
                other
            ))),
        }
    }
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Actor => write!(f, "actor"),
            ReferenceKind::Director => write!(f, "director"),
            ReferenceKind::Genre => write!(f, "genre"),
            ReferenceKind::ProductionCountry => write!(f, "production_country"),
        }
    }
}

/// A normalized, deduplicated entity referenced by media items
/// (an actor, director, genre, or production country)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceEntity {
    pub id: ReferenceId,
    pub kind: ReferenceKind,
    /// Descriptive field: person name, genre type, or country code.
    /// The first-seen spelling is kept; uniqueness is on the folded form.
    pub descriptor: String,
}

/// Case-fold applied to descriptors for uniqueness and lookup.
/// "Johnny Depp", "johnny depp" and " JOHNNY DEPP " all fold to the same key.
pub fn fold_descriptor(descriptor: &str) -> String {
    descriptor.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in ReferenceKind::ALL {
            assert_eq!(kind.to_string().parse::<ReferenceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_from_unknown_string() {
        assert!("writer".parse::<ReferenceKind>().is_err());
    }

    #[test]
    fn test_fold_descriptor() {
        assert_eq!(fold_descriptor(" Johnny Depp "), "johnny depp");
        assert_eq!(fold_descriptor("johnny depp"), fold_descriptor("JOHNNY DEPP"));
    }
}
