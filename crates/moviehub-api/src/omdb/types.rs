//! OMDB API response types and search parameters.

use serde::Deserialize;

/// Value of the `Response` field on a successful payload.
const RESPONSE_TRUE: &str = "True";

// --- Search ---

/// Response from a search (`s=`) request.
///
/// OMDB answers with HTTP 200 for both outcomes and signals the result in
/// `Response`: `"True"` carries `Search`/`totalResults`, `"False"` carries
/// `Error` (e.g. `"Movie not found!"`).
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    /// Search results (present only on success).
    #[serde(rename = "Search", default)]
    pub search: Vec<OmdbSearchItem>,
    /// Total number of results across all pages, as a decimal string.
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    /// Error message (present only on failure).
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    /// Returns `true` when the payload reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response == RESPONSE_TRUE
    }
}

/// A single search result.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    /// Title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year (`"2010"`, or a range such as `"2011–2019"` for series).
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    /// IMDb ID (e.g. `"tt1375666"`).
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media type (`movie`, `series`, `episode`).
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    /// Poster URL or `"N/A"`.
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

// --- Title details ---

/// Response from a title (`i=`) request.
///
/// Every field except `Response` is optional because the failure shape
/// (`{"Response":"False","Error":"Incorrect IMDb ID."}`) shares this type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovieDetails {
    /// `"True"` or `"False"`.
    pub response: String,
    /// Error message (present only on failure).
    #[serde(default)]
    pub error: Option<String>,
    /// IMDb ID.
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Release year.
    #[serde(default)]
    pub year: Option<String>,
    /// Content rating (e.g. `"PG-13"`).
    #[serde(default)]
    pub rated: Option<String>,
    /// Release date (e.g. `"16 Jul 2010"`).
    #[serde(default)]
    pub released: Option<String>,
    /// Runtime (e.g. `"148 min"`).
    #[serde(default)]
    pub runtime: Option<String>,
    /// Comma-separated genre names.
    #[serde(default)]
    pub genre: Option<String>,
    /// Director(s).
    #[serde(default)]
    pub director: Option<String>,
    /// Writer(s).
    #[serde(default)]
    pub writer: Option<String>,
    /// Leading actors.
    #[serde(default)]
    pub actors: Option<String>,
    /// Plot text.
    #[serde(default)]
    pub plot: Option<String>,
    /// Spoken languages.
    #[serde(default)]
    pub language: Option<String>,
    /// Production countries.
    #[serde(default)]
    pub country: Option<String>,
    /// Awards summary.
    #[serde(default)]
    pub awards: Option<String>,
    /// Poster URL or `"N/A"`.
    #[serde(default)]
    pub poster: Option<String>,
    /// IMDb rating on a 0-10 scale, as a decimal string.
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    /// IMDb vote count (e.g. `"2,345,678"`).
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
    /// Media type.
    #[serde(rename = "Type", default)]
    pub media_type: Option<String>,
    /// Box office gross (e.g. `"$292,587,330"`).
    #[serde(default)]
    pub box_office: Option<String>,
}

impl OmdbMovieDetails {
    /// Returns `true` when the payload reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response == RESPONSE_TRUE
    }
}

// --- Error Response ---

/// Body returned alongside non-2xx statuses (e.g. 401 for a bad key).
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbErrorResponse {
    /// Always `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    /// Error message.
    #[serde(rename = "Error")]
    pub error: String,
}

// --- Request Parameters ---

/// Parameters for a search (`s=`) request.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search term (required).
    pub query: String,
    /// Media type filter (default: `movie`).
    pub media_type: Option<String>,
}

impl SearchParams {
    /// Creates new search params for movies with the given term.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            media_type: Some(String::from("movie")),
        }
    }
}
