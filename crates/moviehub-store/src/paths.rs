//! Per-user file locations shared by the store and the CLI config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name used under the per-user base directories.
const APP_DIR: &str = "moviehub";

/// Per-user base directory kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDir {
    /// `~/.config`
    Config,
    /// `~/.local/share`
    Data,
}

impl BaseDir {
    fn under(self, home: &Path) -> PathBuf {
        match self {
            Self::Config => home.join(".config"),
            Self::Data => home.join(".local").join("share"),
        }
    }
}

/// Resolves `file` inside the application directory.
///
/// - If `dir` is `Some`, returns `{dir}/{file}` and `base` is ignored.
/// - Otherwise returns `~/.config/moviehub/{file}` or
///   `~/.local/share/moviehub/{file}` depending on `base`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_app_file(dir: Option<&Path>, base: BaseDir, file: &str) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(file));
    }

    let home = dirs::home_dir().context("failed to determine home directory")?;
    Ok(base.under(&home).join(APP_DIR).join(file))
}
