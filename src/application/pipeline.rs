//! Per-locale feed pipeline
//!
//! For each configured locale: extract raw updates, build normalized and
//! identified records, load the prior document, merge, and write the
//! rendered feed only when the merge actually changed something. Locales
//! are fully independent; one locale failing never stops the others.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::description::strip_leading_breaks;
use crate::domain::feed_document::FeedDocument;
use crate::domain::merge::{merge, MergeOutcome};
use crate::domain::services::{
    ExtractionError, FeedStore, RawUpdate, StoreError, UpdateExtractor,
};
use crate::domain::update::UpdateRecord;
use crate::infrastructure::config::{AppConfig, LocaleConfig};
use crate::infrastructure::feed_serializer::{self, FeedRenderError};

/// Format of the rendered date text on the updates page.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Failure of one locale's pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("feed store failed: {0}")]
    Store(#[from] StoreError),

    #[error("feed render failed: {0}")]
    Render(#[from] FeedRenderError),
}

/// What one locale's run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// New entries were merged in and the document was rewritten.
    Updated {
        new_entries: usize,
        total_entries: usize,
    },
    /// Nothing new was observed; the persisted document was left untouched.
    Unchanged,
}

/// Outcome of one locale in a batch run.
#[derive(Debug)]
pub struct LocaleOutcome {
    pub code: String,
    pub result: Result<RunResult, PipelineError>,
}

/// Drives the extract, merge and persist sequence for every configured
/// locale.
pub struct FeedPipeline<E, S> {
    config: AppConfig,
    extractor: E,
    store: S,
}

impl<E: UpdateExtractor, S: FeedStore> FeedPipeline<E, S> {
    pub fn new(config: AppConfig, extractor: E, store: S) -> Self {
        Self {
            config,
            extractor,
            store,
        }
    }

    /// Runs every configured locale, isolating failures per locale.
    pub async fn run_all(&self) -> Vec<LocaleOutcome> {
        let mut outcomes = Vec::with_capacity(self.config.locales.len());
        for locale in &self.config.locales {
            let span = info_span!("locale", code = %locale.code);
            let result = self.run_locale(locale).instrument(span).await;
            if let Err(err) = &result {
                error!(code = %locale.code, error = %err, "locale run failed");
            }
            outcomes.push(LocaleOutcome {
                code: locale.code.clone(),
                result,
            });
        }
        outcomes
    }

    /// Runs the pipeline for one locale.
    pub async fn run_locale(&self, locale: &LocaleConfig) -> Result<RunResult, PipelineError> {
        let raw = self.extractor.extract(&locale.name).await?;
        debug!(count = raw.len(), "extracted raw updates");

        let records = build_records(raw);
        let prior = self.load_prior(&locale.code).await?;

        let MergeOutcome { changed, document } = merge(&records, &prior);
        if !changed {
            info!("no new updates for {}", locale.code);
            return Ok(RunResult::Unchanged);
        }

        let new_entries = document.len() - prior.len();
        let bytes = feed_serializer::render(&document, locale, &self.config)?;
        self.store.write(&locale.code, &bytes).await?;

        info!(
            new_entries,
            total_entries = document.len(),
            "feed updated for {}",
            locale.code
        );
        Ok(RunResult::Updated {
            new_entries,
            total_entries: document.len(),
        })
    }

    /// Loads the prior document for a merge. A missing document is a normal
    /// first run; an unreadable one is surfaced distinctly before both
    /// degrade to an empty prior.
    async fn load_prior(&self, locale_code: &str) -> Result<FeedDocument, PipelineError> {
        match self.store.read(locale_code).await {
            Ok(bytes) => match feed_serializer::parse(&bytes) {
                Ok(document) => {
                    debug!(entries = document.len(), "loaded prior feed document");
                    Ok(document)
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        "existing feed document is unreadable, merging against an empty prior"
                    );
                    Ok(FeedDocument::empty())
                }
            },
            Err(StoreError::NotFound { .. }) => {
                info!("no prior feed document, treating as first run");
                Ok(FeedDocument::empty())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Turns raw tuples into normalized, identified records. A tuple whose date
/// text cannot be parsed, or whose title is empty, is dropped and the batch
/// continues.
fn build_records(raw: Vec<RawUpdate>) -> Vec<UpdateRecord> {
    let mut records = Vec::with_capacity(raw.len());
    for update in raw {
        let date = match NaiveDate::parse_from_str(update.date_text.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(err) => {
                warn!(
                    date_text = %update.date_text,
                    error = %err,
                    "dropping update with unparseable date"
                );
                continue;
            }
        };
        if update.title.trim().is_empty() {
            warn!(date = %date, "dropping update with empty title");
            continue;
        }
        let content = strip_leading_breaks(&update.description_html);
        records.push(UpdateRecord::new(update.title, date, content));
    }
    records
}
