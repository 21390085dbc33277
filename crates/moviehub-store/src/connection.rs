//! Database connection management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::run_migrations;
use super::paths::{BaseDir, resolve_app_file};
use super::storage::SqliteStorage;

/// Database file name.
const DB_FILE: &str = "moviehub.db";

/// Opens (or creates) the store database and runs migrations.
///
/// - If `dir` is `Some`, uses `{dir}/moviehub.db`.
/// - Otherwise uses `~/.local/share/moviehub/moviehub.db`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrations fail.
pub fn open_store(dir: Option<&Path>) -> Result<SqliteStorage> {
    let db_path = resolve_db_path(dir)?;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    run_migrations(&conn).context("database migration failed")?;
    tracing::debug!(path = %db_path.display(), "store opened");

    Ok(SqliteStorage::new(conn))
}

/// Resolves the database file path.
fn resolve_db_path(dir: Option<&Path>) -> Result<PathBuf> {
    resolve_app_file(dir, BaseDir::Data, DB_FILE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_open_store_in_temp_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let storage = open_store(Some(dir.path())).unwrap();

        // Assert
        assert!(dir.path().join(DB_FILE).exists());
        assert_eq!(storage.get_item("favoriteMovies").unwrap(), None);
    }

    #[test]
    fn test_open_store_creates_missing_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        // Act
        open_store(Some(&nested)).unwrap();

        // Assert
        assert!(nested.join(DB_FILE).exists());
    }

    #[test]
    fn test_data_survives_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        open_store(Some(dir.path()))
            .unwrap()
            .set_item("movieRatings", r#"{"tt1":4}"#)
            .unwrap();

        // Act
        let reopened = open_store(Some(dir.path())).unwrap();

        // Assert
        assert_eq!(
            reopened.get_item("movieRatings").unwrap().as_deref(),
            Some(r#"{"tt1":4}"#)
        );
    }

    #[test]
    fn test_resolve_db_path_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_db_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject/moviehub.db"));
    }

    #[test]
    fn test_resolve_db_path_default() {
        // Arrange & Act
        let path = resolve_db_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".local/share/moviehub/moviehub.db"));
    }
}
