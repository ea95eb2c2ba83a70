//! Update record and feed entry types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identity::EntryId;

/// A single scraped update, normalized and identified, before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub id: EntryId,
    pub title: String,
    /// Publication date. No time-of-day is meaningful for identity; a
    /// synthetic midnight-UTC instant is attached for ordering and display.
    pub date: NaiveDate,
    /// Normalized HTML description fragment. May be empty.
    pub content: String,
}

impl UpdateRecord {
    /// Builds a record from already-normalized parts, deriving its identity
    /// from the publication date.
    pub fn new(title: impl Into<String>, date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            id: EntryId::for_date(date),
            title: title.into(),
            date,
            content: content.into(),
        }
    }

    /// The instant rendered as this record's publication timestamp.
    #[must_use]
    pub fn published_at(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

/// A record committed into a persisted feed document.
///
/// Entries are immutable once created: a re-scrape never rewrites the
/// persisted title or content for a known id. The date is optional only so
/// that documents this system did not produce degrade gracefully when read
/// back; every entry we promote ourselves carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub id: EntryId,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub content: String,
}

impl FeedEntry {
    /// The instant rendered as this entry's publication timestamp, when the
    /// persisted document carried a parseable one.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.date.map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl From<UpdateRecord> for FeedEntry {
    fn from(record: UpdateRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            date: Some(record.date),
            content: record.content,
        }
    }
}
