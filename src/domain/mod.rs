//! Core domain model for the updates feed
//!
//! Pure types and algorithms: record identity, description normalization,
//! the in-memory feed document, and the merge engine. Nothing in here does
//! I/O; the collaborator contracts the pipeline drives live in `services`.

pub mod description;
pub mod feed_document;
pub mod identity;
pub mod merge;
pub mod services;
pub mod update;

// Re-export commonly used items
pub use feed_document::FeedDocument;
pub use identity::EntryId;
pub use merge::{merge, MergeOutcome};
pub use update::{FeedEntry, UpdateRecord};
