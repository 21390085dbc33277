//! OMDB API client module.
//!
//! Handles HTTP requests to the OMDB endpoint and retrieves
//! movie search listings and single-title details.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalOmdbApi, OmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, OmdbClient, OmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    OmdbErrorResponse, OmdbMovieDetails, OmdbSearchItem, OmdbSearchResponse, SearchParams,
};
