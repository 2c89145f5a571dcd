use crate::models::{MediaItem, Recommendation};

/// Shapes engine output into the external query contract: exactly the title
/// and release year of each item, preserving engine order. Pure and total;
/// upstream errors are the only failure mode of a query.
pub fn to_recommendations(items: &[MediaItem]) -> Vec<Recommendation> {
    items
        .iter()
        .map(|item| Recommendation {
            title: item.title.clone(),
            release_year: item.release_year,
        })
        .collect()
}
