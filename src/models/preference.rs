use serde::{Deserialize, Serialize};

/// Result size used when a request does not name a limit
pub const DEFAULT_LIMIT: usize = 10;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// A user's stated preference, dispatched structurally by the engine.
///
/// This is a closed set: new query shapes are added as variants, never by
/// branching on untyped strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Preference {
    /// Media featuring a person, as actor or director
    Person {
        person_name: String,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    /// Media in a genre whose IMDb score falls near a target
    GenreScore {
        genre_type: String,
        center_score: f64,
        #[serde(default = "default_limit")]
        limit: usize,
    },
}

/// External record for one recommended media item.
/// Exactly the documented query contract; no other catalog fields leak out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub release_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_preference_deserializes_with_default_limit() {
        let pref: Preference =
            serde_json::from_str(r#"{"type": "person", "person_name": "Johnny Depp"}"#).unwrap();
        assert_eq!(
            pref,
            Preference::Person {
                person_name: "Johnny Depp".to_string(),
                limit: DEFAULT_LIMIT,
            }
        );
    }

    #[test]
    fn test_genre_score_preference_deserializes() {
        let pref: Preference = serde_json::from_str(
            r#"{"type": "genre_score", "genre_type": "drama", "center_score": 8.0, "limit": 3}"#,
        )
        .unwrap();
        assert_eq!(
            pref,
            Preference::GenreScore {
                genre_type: "drama".to_string(),
                center_score: 8.0,
                limit: 3,
            }
        );
    }

    #[test]
    fn test_unknown_variant_rejected() {
        let result: Result<Preference, _> =
            serde_json::from_str(r#"{"type": "mood", "mood": "gloomy"}"#);
        assert!(result.is_err());
    }
}
