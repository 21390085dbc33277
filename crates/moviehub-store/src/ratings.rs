//! Ratings: a JSON object mapping movie identifiers to 1-5 scores.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use moviehub_catalog::MovieId;

use crate::storage::Storage;

/// Storage key holding the ratings JSON object.
pub const RATINGS_KEY: &str = "movieRatings";

/// A user rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] unless `value` is in `1..=5`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invalid rating value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingError {
    /// Value outside `1..=5`.
    OutOfRange(u8),
}

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(v) => write!(
                f,
                "rating must be between {} and {}, got {v}",
                Rating::MIN,
                Rating::MAX
            ),
        }
    }
}

impl std::error::Error for RatingError {}

/// Persisted per-movie ratings.
#[derive(Debug)]
pub struct RatingsStore<S> {
    storage: S,
}

impl<S: Storage> RatingsStore<S> {
    /// Creates a store over `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the persisted mapping as stored.
    ///
    /// A missing, unreadable, or corrupt blob reads as empty.
    pub fn ratings(&self) -> BTreeMap<MovieId, u8> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(key = RATINGS_KEY, error = %format!("{e:#}"), "ignoring unreadable ratings");
            BTreeMap::new()
        })
    }

    fn load(&self) -> Result<BTreeMap<MovieId, u8>> {
        let Some(raw) = self
            .storage
            .get_item(RATINGS_KEY)
            .context("failed to read ratings")?
        else {
            return Ok(BTreeMap::new());
        };
        serde_json::from_str(&raw).context("stored ratings are corrupt")
    }

    /// Returns the rating for `id`, if any.
    pub fn rating(&self, id: &MovieId) -> Option<u8> {
        self.ratings().get(id).copied()
    }

    /// Stores `rating` for `id`, replacing any previous rating.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored mapping cannot be read or parsed, in
    /// which case nothing is written, or if it cannot be written back.
    pub fn submit_rating(&self, id: &MovieId, rating: Rating) -> Result<()> {
        let mut ratings = self.load()?;
        ratings.insert(id.clone(), rating.value());

        let json = serde_json::to_string(&ratings).context("failed to serialize ratings")?;
        self.storage
            .set_item(RATINGS_KEY, &json)
            .context("failed to save ratings")?;

        tracing::debug!(%id, rating = rating.value(), "rating saved");
        Ok(())
    }
}
