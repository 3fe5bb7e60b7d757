//! Medicine name normalization.
//!
//! Matching and deduplication compare trimmed, lowercased names. Display
//! always keeps what the user typed.

/// Normalize a medicine name for comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Order two normalized names so an unordered pair has one key.
pub fn pair_key<'a>(first: &'a str, second: &'a str) -> (&'a str, &'a str) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}
