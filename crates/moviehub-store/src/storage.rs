//! Flat string key-value storage.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// A flat string key-value store.
///
/// Stores read and write whole blobs; there is no partial update.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Storage backed by the `storage` table of a `SQLite` database.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps a connection whose schema is already migrated.
    #[must_use]
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read storage key {key}"))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, value],
            )
            .with_context(|| format!("failed to write storage key {key}"))?;
        Ok(())
    }
}

/// Non-persistent storage, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(String::from(key), String::from(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::migrations::run_migrations;

    fn sqlite() -> SqliteStorage {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        SqliteStorage::new(conn)
    }

    fn exercise(storage: &impl Storage) {
        // Missing key
        assert_eq!(storage.get_item("k").unwrap(), None);

        // Insert, then overwrite
        storage.set_item("k", "one").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("one"));
        storage.set_item("k", "two").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_sqlite_storage_semantics() {
        // Arrange
        let storage = sqlite();

        // Act & Assert
        exercise(&storage);
    }

    #[test]
    fn test_memory_storage_semantics() {
        // Arrange
        let storage = MemoryStorage::new();

        // Act & Assert
        exercise(&storage);
    }

    #[test]
    fn test_keys_are_independent() {
        // Arrange
        let storage = sqlite();

        // Act
        storage.set_item("favoriteMovies", "[]").unwrap();
        storage.set_item("movieRatings", "{}").unwrap();
        storage.set_item("favoriteMovies", r#"[{"id":"tt1","title":"A"}]"#).unwrap();

        // Assert
        assert_eq!(
            storage.get_item("favoriteMovies").unwrap().as_deref(),
            Some(r#"[{"id":"tt1","title":"A"}]"#)
        );
        assert_eq!(storage.get_item("movieRatings").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_storage_through_reference() {
        // Arrange
        fn write<S: Storage>(storage: S) {
            storage.set_item("k", "v").unwrap();
        }
        let storage = MemoryStorage::new();

        // Act
        write(&storage);

        // Assert
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
