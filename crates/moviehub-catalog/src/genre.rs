//! Genre names and title keywords.
//!
//! Search listings carry no genre data, so a genre is approximated by
//! keywords that tend to appear in matching titles.

use unicode_normalization::UnicodeNormalization;

/// Genre names offered by the filter, with their title keywords.
pub const GENRE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Action", &["action", "fight", "war", "battle", "hero"]),
    ("Comedy", &["comedy", "funny", "laugh", "humor"]),
    ("Drama", &["drama", "story", "life", "love"]),
    ("Horror", &["horror", "scary", "fear", "dark"]),
    ("Romance", &["love", "romance", "heart", "wedding"]),
    ("Sci-Fi", &["space", "future", "alien", "robot", "star"]),
    ("Thriller", &["thriller", "mystery", "crime", "detective"]),
];

/// Returns the genre names in display order.
pub fn genre_names() -> impl Iterator<Item = &'static str> {
    GENRE_KEYWORDS.iter().map(|(name, _)| *name)
}

/// Returns the title keywords for a genre.
///
/// Known genres match case-insensitively; an unknown genre yields its own
/// normalized name as the only keyword.
#[must_use]
pub fn keywords_for(genre: &str) -> Vec<String> {
    GENRE_KEYWORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(genre.trim()))
        .map_or_else(
            || vec![normalize(genre)],
            |(_, keywords)| keywords.iter().map(|k| String::from(*k)).collect(),
        )
}

/// Returns `true` if the title contains any keyword.
#[must_use]
pub fn title_matches(title: &str, keywords: &[String]) -> bool {
    let title = normalize(title);
    keywords.iter().any(|k| title.contains(k.as_str()))
}

/// NFKC-normalizes, trims and lowercases text for comparison.
pub(crate) fn normalize(text: &str) -> String {
    text.trim().nfkc().collect::<String>().to_lowercase()
}
