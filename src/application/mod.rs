//! Application layer orchestrating the per-locale feed pipeline

pub mod pipeline;

pub use pipeline::{FeedPipeline, LocaleOutcome, PipelineError, RunResult};
