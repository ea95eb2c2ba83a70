//! In-memory feed document model

use std::collections::HashSet;

use crate::domain::identity::EntryId;
use crate::domain::update::FeedEntry;

/// A feed document's entries, independent of the serialization format.
///
/// Entries are keyed by id: no two entries ever share one. The document is
/// either empty (no prior document for the locale) or built from the entries
/// a serializer recovered; the merge engine holds a copy only for the
/// duration of one merge.
#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    entries: Vec<FeedEntry>,
    ids: HashSet<EntryId>,
}

impl FeedDocument {
    /// An empty document, the prior for a locale's first run.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a document from entries, keeping the first occurrence of any
    /// duplicated id.
    pub fn from_entries(entries: impl IntoIterator<Item = FeedEntry>) -> Self {
        let mut document = Self::default();
        for entry in entries {
            document.push(entry);
        }
        document
    }

    fn push(&mut self, entry: FeedEntry) {
        if self.ids.insert(entry.id.clone()) {
            self.entries.push(entry);
        }
    }

    /// O(1) membership test used by the merge engine.
    #[must_use]
    pub fn contains_id(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    /// The entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
