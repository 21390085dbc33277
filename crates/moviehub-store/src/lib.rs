//! Persistence layer for favorites and ratings.
//!
//! Both stores keep their whole collection as one JSON blob under a fixed
//! key in a [`Storage`] implementation. The default backend is a key-value
//! table in a bundled `SQLite` database.

mod connection;
/// Favorites store with change notification.
pub mod favorites;
mod migrations;
/// Per-user file locations.
pub mod paths;
/// Ratings store.
pub mod ratings;
/// Key-value storage backends.
pub mod storage;

#[allow(clippy::module_name_repetitions)]
pub use connection::open_store;
pub use favorites::{FAVORITES_KEY, FavoritesChanged, FavoritesStore};
pub use paths::{BaseDir, resolve_app_file};
pub use ratings::{RATINGS_KEY, Rating, RatingError, RatingsStore};
pub use storage::{MemoryStorage, SqliteStorage, Storage};
