//! Fetch adapter: one request per view, failures degrade to empty results.

use std::fmt;
use std::str::FromStr;

use moviehub_api::omdb::{LocalOmdbApi, SearchParams};
use tracing::instrument;

use crate::model::{MovieDetails, MovieRecord};

/// Search term used when a selector has no entry in the lookup table.
pub const FALLBACK_TERM: &str = "movie";

/// Number of records shown in the featured banner.
pub const FEATURED_COUNT: usize = 5;

/// Category selector to provider search term.
const CATEGORY_TERMS: &[(&str, &str)] = &[("popular", "action"), ("top", "classic"), ("new", "2025")];

/// Listing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Popular movies.
    #[default]
    Popular,
    /// Top rated movies.
    TopRated,
    /// Newly released movies.
    Upcoming,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Self; 3] = [Self::Popular, Self::TopRated, Self::Upcoming];

    /// Selector keyword used in the lookup table.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top",
            Self::Upcoming => "new",
        }
    }

    /// Heading shown above the listing.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular Movies",
            Self::TopRated => "Top Movies",
            Self::Upcoming => "New Movies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" => Ok(Self::Popular),
            "top" | "toprated" | "top-rated" => Ok(Self::TopRated),
            "new" | "upcoming" => Ok(Self::Upcoming),
            other => Err(format!(
                "unknown category '{other}' (expected one of: {})",
                Self::ALL.map(Self::selector).join(", ")
            )),
        }
    }
}

/// Result of a fetch that never fails.
///
/// `error` holds a user-facing message when the request failed or the
/// provider reported no results; `data` is then empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fetched<T> {
    /// Fetched data, or the empty value on failure.
    pub data: T,
    /// Failure message, if any.
    pub error: Option<String>,
}

impl<T: Default> Fetched<T> {
    fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            data: T::default(),
            error: Some(message.into()),
        }
    }
}

/// Resolves the provider search term for a selector and optional query.
///
/// A non-blank query is searched literally; otherwise the selector is
/// looked up in the category table, falling back to [`FALLBACK_TERM`].
#[must_use]
pub fn resolve_search_term(selector: &str, query: Option<&str>) -> String {
    if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
        return String::from(q);
    }
    let selector = selector.trim();
    CATEGORY_TERMS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(selector))
        .map_or(FALLBACK_TERM, |(_, term)| term)
        .to_owned()
}

/// Fetches a movie listing.
///
/// Returns the provider's results in order. Transport, status, and parse
/// failures as well as `"Response":"False"` payloads yield an empty list
/// with an error message.
#[instrument(skip_all, fields(selector = %selector, query = ?query))]
pub async fn fetch_movies(
    api: &(impl LocalOmdbApi + Sync),
    selector: &str,
    query: Option<&str>,
) -> Fetched<Vec<MovieRecord>> {
    let term = resolve_search_term(selector, query);
    let params = SearchParams::new(&term);

    match api.search(&params).await {
        Ok(response) if response.is_success() => {
            let movies: Vec<MovieRecord> =
                response.search.into_iter().map(MovieRecord::from).collect();
            tracing::debug!(term = %term, count = movies.len(), "listing fetched");
            Fetched::ok(movies)
        }
        Ok(response) => {
            let message = response
                .error
                .unwrap_or_else(|| String::from("no results"));
            tracing::warn!(term = %term, error = %message, "OMDB returned no results");
            Fetched::failed(message)
        }
        Err(e) => {
            tracing::warn!(term = %term, error = %format!("{e:#}"), "failed to fetch movies");
            Fetched::failed(format!("{e:#}"))
        }
    }
}

/// Fetches the featured banner: the first [`FEATURED_COUNT`] popular movies.
pub async fn fetch_featured(api: &(impl LocalOmdbApi + Sync)) -> Fetched<Vec<MovieRecord>> {
    let mut fetched = fetch_movies(api, Category::Popular.selector(), None).await;
    fetched.data.truncate(FEATURED_COUNT);
    fetched
}

/// Fetches full details for one movie.
///
/// Failures, including unknown IDs, yield `None` with an error message.
#[instrument(skip_all, fields(id = %id))]
pub async fn fetch_movie_details(
    api: &(impl LocalOmdbApi + Sync),
    id: &str,
) -> Fetched<Option<MovieDetails>> {
    match api.title(id.trim()).await {
        Ok(raw) => {
            let provider_error = raw.error.clone();
            MovieDetails::from_omdb(raw).map_or_else(
                || {
                    let message = provider_error.unwrap_or_else(|| String::from("Movie not found"));
                    tracing::warn!(id, error = %message, "OMDB returned no title");
                    Fetched::failed(message)
                },
                |details| Fetched::ok(Some(details)),
            )
        }
        Err(e) => {
            tracing::warn!(id, error = %format!("{e:#}"), "failed to fetch movie details");
            Fetched::failed(format!("{e:#}"))
        }
    }
}
