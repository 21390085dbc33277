//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{OmdbMovieDetails, OmdbSearchResponse, SearchParams};

/// OMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Searches for titles matching a term.
    ///
    /// A `"Response":"False"` payload is returned as `Ok`; callers inspect
    /// [`OmdbSearchResponse::is_success`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 2xx,
    /// or JSON parsing fails.
    async fn search(&self, params: &SearchParams) -> Result<OmdbSearchResponse>;

    /// Fetches a single title by IMDb ID, with the full plot.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not 2xx,
    /// or JSON parsing fails.
    async fn title(&self, imdb_id: &str) -> Result<OmdbMovieDetails>;
}
