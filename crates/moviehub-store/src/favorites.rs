//! Favorites: a de-duplicated list of movie records under one key.

use std::collections::HashSet;

use anyhow::{Context, Result};
use moviehub_catalog::{MovieId, MovieRecord};
use tokio::sync::broadcast;

use crate::storage::Storage;

/// Storage key holding the favorites JSON array.
pub const FAVORITES_KEY: &str = "favoriteMovies";

/// Buffered notifications per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 16;

/// Notification sent after every favorites write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesChanged {
    /// Number of favorites after the write.
    pub count: usize,
}

/// Persisted favorites with change notification.
///
/// Every mutation rewrites the whole list and then notifies subscribers.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    changes: broadcast::Sender<FavoritesChanged>,
}

impl<S: Storage> FavoritesStore<S> {
    /// Creates a store over `storage`.
    pub fn new(storage: S) -> Self {
        let (changes, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { storage, changes }
    }

    /// Returns the persisted favorites in insertion order.
    ///
    /// A missing, unreadable, or corrupt blob reads as empty. Duplicate
    /// identifiers keep their first occurrence.
    pub fn list_favorites(&self) -> Vec<MovieRecord> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = FAVORITES_KEY, error = %format!("{e:#}"), "ignoring unreadable favorites");
                Vec::new()
            }
        }
    }

    /// Reads and dedupes the stored list, failing on read or parse errors.
    fn load(&self) -> Result<Vec<MovieRecord>> {
        let Some(raw) = self
            .storage
            .get_item(FAVORITES_KEY)
            .context("failed to read favorites")?
        else {
            return Ok(Vec::new());
        };

        let mut records: Vec<MovieRecord> =
            serde_json::from_str(&raw).context("stored favorites are corrupt")?;
        let mut seen = HashSet::new();
        records.retain(|m| seen.insert(m.id.clone()));
        Ok(records)
    }

    /// Returns `true` if `id` is a favorite.
    pub fn is_favorite(&self, id: &MovieId) -> bool {
        self.list_favorites().iter().any(|m| &m.id == id)
    }

    /// Number of favorites.
    pub fn count(&self) -> usize {
        self.list_favorites().len()
    }

    /// Adds `record` if absent, removes it by identifier if present.
    ///
    /// Returns whether the movie is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored list cannot be read or parsed, in
    /// which case nothing is written, or if the list cannot be written back.
    pub fn toggle_favorite(&self, record: &MovieRecord) -> Result<bool> {
        let mut favorites = self.load()?;

        let is_favorite = match favorites.iter().position(|m| m.id == record.id) {
            Some(pos) => {
                favorites.remove(pos);
                false
            }
            None => {
                favorites.push(record.clone());
                true
            }
        };

        let json = serde_json::to_string(&favorites).context("failed to serialize favorites")?;
        self.storage
            .set_item(FAVORITES_KEY, &json)
            .context("failed to save favorites")?;

        let count = favorites.len();
        tracing::debug!(id = %record.id, is_favorite, count, "favorites updated");
        if self.changes.send(FavoritesChanged { count }).is_err() {
            tracing::trace!("no favorites subscribers");
        }

        Ok(is_favorite)
    }

    /// Returns a receiver for notifications sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesChanged> {
        self.changes.subscribe()
    }
}
