//! Normalized movie records built from OMDB payloads.

use std::fmt;
use std::sync::LazyLock;

use moviehub_api::omdb::{OmdbMovieDetails, OmdbSearchItem};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder OMDB uses for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Leading four-digit year (`"2010"`, `"2011–2019"`, `"2024–"`).
#[allow(clippy::expect_used)]
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{4})").expect("failed to compile year regex"));

/// Movie identifier (IMDb ID such as `tt0372784`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Creates an identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(String::from(id))
    }
}

/// A movie as shown in listings and stored in favorites.
///
/// Aliases accept the provider's field names so favorites written as raw
/// OMDB objects deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Identifier.
    #[serde(alias = "imdbID")]
    pub id: MovieId,
    /// Title.
    #[serde(alias = "Title")]
    pub title: String,
    /// Release year as reported by the provider.
    #[serde(alias = "Year", default)]
    pub year: Option<String>,
    /// Poster URL.
    #[serde(alias = "Poster", default)]
    pub poster: Option<String>,
    /// Plot text.
    #[serde(alias = "Plot", default)]
    pub plot: Option<String>,
    /// Rating on a 0-10 scale. Search listings carry none.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Genre names. Empty when the source has no genre data.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Media type (`movie`, `series`, ...).
    #[serde(alias = "Type", default)]
    pub media_type: Option<String>,
}

impl MovieRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: MovieId::new(id),
            title: title.into(),
            year: None,
            poster: None,
            plot: None,
            rating: None,
            genres: Vec::new(),
            media_type: None,
        }
    }

    /// Sets the release year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the genre names.
    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the leading four-digit year as a number.
    #[must_use]
    pub fn year_number(&self) -> Option<u16> {
        let year = self.year.as_deref()?;
        YEAR_RE.captures(year)?.get(1)?.as_str().parse().ok()
    }
}

impl From<OmdbSearchItem> for MovieRecord {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            id: MovieId(item.imdb_id),
            title: item.title,
            year: available(item.year),
            poster: available(item.poster),
            plot: None,
            rating: None,
            genres: Vec::new(),
            media_type: available(item.media_type),
        }
    }
}

/// Full details for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    /// Listing-level fields.
    pub record: MovieRecord,
    /// Content rating (e.g. `PG-13`).
    pub rated: Option<String>,
    /// Release date.
    pub released: Option<String>,
    /// Runtime.
    pub runtime: Option<String>,
    /// Director(s).
    pub director: Option<String>,
    /// Writer(s).
    pub writer: Option<String>,
    /// Leading actors.
    pub actors: Option<String>,
    /// Spoken languages.
    pub language: Option<String>,
    /// Production countries.
    pub country: Option<String>,
    /// Awards summary.
    pub awards: Option<String>,
    /// Box office gross.
    pub box_office: Option<String>,
    /// IMDb vote count.
    pub imdb_votes: Option<String>,
}

impl MovieDetails {
    /// Normalizes a title payload.
    ///
    /// Returns `None` for a failure payload or one missing the ID or title.
    #[must_use]
    pub fn from_omdb(details: OmdbMovieDetails) -> Option<Self> {
        if !details.is_success() {
            return None;
        }
        let id = available(details.imdb_id)?;
        let title = available(details.title)?;

        let genres = available(details.genre)
            .map(|g| {
                g.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let record = MovieRecord {
            id: MovieId(id),
            title,
            year: available(details.year),
            poster: available(details.poster),
            plot: available(details.plot),
            rating: available(details.imdb_rating).and_then(|r| r.parse().ok()),
            genres,
            media_type: available(details.media_type),
        };

        Some(Self {
            record,
            rated: available(details.rated),
            released: available(details.released),
            runtime: available(details.runtime),
            director: available(details.director),
            writer: available(details.writer),
            actors: available(details.actors),
            language: available(details.language),
            country: available(details.country),
            awards: available(details.awards),
            box_office: available(details.box_office),
            imdb_votes: available(details.imdb_votes),
        })
    }
}

/// Maps `"N/A"` and blank strings to `None`.
fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != NOT_AVAILABLE
    })
}
