//! Incremental feed merge engine
//!
//! Combines a freshly scraped candidate batch with the prior persisted
//! document. Merges only ever add entries: a candidate whose id is already
//! persisted is discarded, because the stored entry is authoritative even
//! when the page re-rendered its title or description differently. This
//! keeps every entry byte-stable from the run that first observed it and
//! the resulting document free of spurious diffs.

use std::collections::HashSet;

use crate::domain::feed_document::FeedDocument;
use crate::domain::update::{FeedEntry, UpdateRecord};

/// Result of merging a candidate batch against a prior document.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// False when the batch contained nothing new; the caller must not
    /// rewrite the persisted document in that case.
    pub changed: bool,
    /// The combined document, newest entry first.
    pub document: FeedDocument,
}

/// Merges `candidates` into `prior`.
///
/// Candidates sharing an id within the batch collapse to the first
/// encountered record. The merged entries are ordered by date descending
/// with a stable sort, so equal inputs always produce identical output;
/// entries whose persisted date could not be recovered order last.
#[must_use]
pub fn merge(candidates: &[UpdateRecord], prior: &FeedDocument) -> MergeOutcome {
    let mut seen = HashSet::new();
    let mut fresh: Vec<FeedEntry> = Vec::new();
    for record in candidates {
        if !seen.insert(record.id.clone()) || prior.contains_id(&record.id) {
            continue;
        }
        fresh.push(FeedEntry::from(record.clone()));
    }

    if fresh.is_empty() {
        return MergeOutcome {
            changed: false,
            document: prior.clone(),
        };
    }

    let mut entries = fresh;
    entries.extend(prior.entries().iter().cloned());
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    MergeOutcome {
        changed: true,
        document: FeedDocument::from_entries(entries),
    }
}
