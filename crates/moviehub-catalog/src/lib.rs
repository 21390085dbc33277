//! Movie catalog: normalized records, the fetch adapter, and the filter engine.

pub mod fetch;
pub mod filter;
pub mod genre;
pub mod model;

pub use fetch::{Category, Fetched, fetch_featured, fetch_movie_details, fetch_movies};
pub use filter::{FilterSpec, apply_filters};
pub use model::{MovieDetails, MovieId, MovieRecord};
