//! Client-side filtering of movie listings.

use crate::genre::{keywords_for, normalize, title_matches};
use crate::model::MovieRecord;

/// Minimum rating at or above which the year heuristic requires 2010+.
const HIGH_RATING: f64 = 8.0;
/// Minimum rating at or above which the year heuristic requires 2000+.
const MID_RATING: f64 = 6.0;
/// Earliest year kept for a high minimum rating.
const HIGH_RATING_YEAR: u16 = 2010;
/// Earliest year kept for a mid minimum rating.
const MID_RATING_YEAR: u16 = 2000;

/// Filter constraints chosen by the user.
///
/// `None` and empty strings both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Genre name (e.g. `Action`).
    pub genre: Option<String>,
    /// Release year, compared exactly (e.g. `2010`).
    pub year: Option<String>,
    /// Minimum rating as a numeric string (e.g. `7`).
    pub min_rating: Option<String>,
}

impl FilterSpec {
    /// Returns `true` if at least one field constrains the result.
    #[must_use]
    pub fn is_active(&self) -> bool {
        [&self.genre, &self.year, &self.min_rating]
            .into_iter()
            .any(|f| active(f.as_ref()).is_some())
    }
}

/// Returns the records matching `spec`, preserving input order.
///
/// Narrowing is sequential: year, then minimum rating, then genre.
#[must_use]
pub fn apply_filters(movies: &[MovieRecord], spec: &FilterSpec) -> Vec<MovieRecord> {
    let year = active(spec.year.as_ref());
    let min_rating = active(spec.min_rating.as_ref()).and_then(parse_rating);
    let genre = active(spec.genre.as_ref()).map(GenreMatcher::new);

    movies
        .iter()
        .filter(|m| year.is_none_or(|y| m.year.as_deref() == Some(y)))
        .filter(|m| min_rating.is_none_or(|r| meets_min_rating(m, r)))
        .filter(|m| genre.as_ref().is_none_or(|g| g.matches(m)))
        .cloned()
        .collect()
}

/// Returns the trimmed value when it is non-empty.
fn active(field: Option<&String>) -> Option<&str> {
    field.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Parses a minimum rating; non-numeric input is no constraint.
fn parse_rating(raw: &str) -> Option<f64> {
    let parsed = raw.parse::<f64>().ok().filter(|r| r.is_finite());
    if parsed.is_none() {
        tracing::debug!(raw, "ignoring non-numeric minimum rating");
    }
    parsed
}

/// Checks the rating, or approximates it from the year when absent.
fn meets_min_rating(movie: &MovieRecord, min: f64) -> bool {
    if let Some(rating) = movie.rating {
        return rating >= min;
    }
    let earliest = if min >= HIGH_RATING {
        HIGH_RATING_YEAR
    } else if min >= MID_RATING {
        MID_RATING_YEAR
    } else {
        return true;
    };
    movie.year_number().is_some_and(|y| y >= earliest)
}

/// Genre predicate over records with or without genre data.
struct GenreMatcher {
    name: String,
    keywords: Vec<String>,
}

impl GenreMatcher {
    fn new(genre: &str) -> Self {
        Self {
            name: normalize(genre),
            keywords: keywords_for(genre),
        }
    }

    fn matches(&self, movie: &MovieRecord) -> bool {
        if movie.genres.is_empty() {
            title_matches(&movie.title, &self.keywords)
        } else {
            movie.genres.iter().any(|g| normalize(g) == self.name)
        }
    }
}
