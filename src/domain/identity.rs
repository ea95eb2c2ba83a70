//! Stable, content-based identity for update records
//!
//! Identity is anchored purely to the calendar date an update was published:
//! re-scraping the page must yield the same id for the same update even when
//! the rendered title or description differs cosmetically between runs. Two
//! genuine updates published on the same date therefore collapse to one
//! entry; that is a known limitation of the source data.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Unique identifier of a feed entry, used for deduplication across runs.
///
/// Stored and rendered as the lowercase hex SHA-256 digest of the decimal
/// day, month and year concatenated without separators or zero padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    /// Derives the identifier for an update published on `date`.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}{}{}", date.day(), date.month(), date.year()).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wraps an identifier read back from a persisted document.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
