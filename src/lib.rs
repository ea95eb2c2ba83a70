//! CS2 Updates Feed - Incremental RSS Feed Generator
//!
//! Scrapes the Counter-Strike updates page per configured locale and
//! maintains one durable RSS 2.0 document per locale, merging freshly
//! observed updates into the persisted history without duplicating or
//! losing entries.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;

// Re-export the pipeline entry points for easier access
pub use application::pipeline::{FeedPipeline, LocaleOutcome};
pub use infrastructure::config::AppConfig;
