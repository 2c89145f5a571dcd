mod media;
mod preference;
mod reference;

pub use media::{MediaId, MediaItem, MediaKind, NewMedia, MIN_RELEASE_YEAR};
pub use preference::{Preference, Recommendation, DEFAULT_LIMIT};
pub use reference::{fold_descriptor, ReferenceEntity, ReferenceId, ReferenceKind};
