//! File-backed feed document store
//!
//! One XML document per locale under the configured feeds directory.
//! Writes go through a temporary sibling file and a rename, so a crashed
//! run never leaves a partially written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::services::{FeedStore, StoreError};

/// Store keeping each locale's document at `feeds_dir/updates-feed-{code}.xml`.
#[derive(Debug, Clone)]
pub struct FileFeedStore {
    feeds_dir: PathBuf,
}

impl FileFeedStore {
    #[must_use]
    pub fn new(feeds_dir: impl Into<PathBuf>) -> Self {
        Self {
            feeds_dir: feeds_dir.into(),
        }
    }

    /// Path of one locale's document.
    #[must_use]
    pub fn document_path(&self, locale_code: &str) -> PathBuf {
        self.feeds_dir.join(format!("updates-feed-{locale_code}.xml"))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn read(&self, locale_code: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.document_path(locale_code);
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                code: locale_code.to_string(),
            }),
            Err(err) => Err(StoreError::Io { source: err }),
        }
    }

    async fn write(&self, locale_code: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.feeds_dir).await?;

        let path = self.document_path(locale_code);
        let temp = Self::temp_path(&path);
        fs::write(&temp, bytes).await?;
        fs::rename(&temp, &path).await?;

        debug!(path = %path.display(), bytes = bytes.len(), "wrote feed document");
        Ok(())
    }
}
