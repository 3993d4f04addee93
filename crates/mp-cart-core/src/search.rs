pub const MIN_QUERY_CHARS: usize = 2;

pub const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Turmeric powder",
    "Aloe vera gel",
    "Ashwagandha capsules",
    "Neem oil",
    "Chamomile tea",
];

pub fn query_is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Case-insensitive substring match over `catalog`, preserving its order.
/// Queries shorter than [`MIN_QUERY_CHARS`] match nothing.
pub fn suggest<'a>(query: &str, catalog: &[&'a str]) -> Vec<&'a str> {
    if !query_is_searchable(query) {
        return Vec::new();
    }

    let needle = query.trim().to_lowercase();
    catalog
        .iter()
        .copied()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .collect()
}
