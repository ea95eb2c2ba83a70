//! Configuration for the updates feed pipeline
//!
//! Everything ships with working defaults; an optional JSON file overlays
//! them. The locale table lives here: adding a locale is a configuration
//! change, not a code change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "UPDATES_FEED_CONFIG";

/// Config file looked up next to the working directory when the environment
/// variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "updates-feed.json";

/// Constants for the scraped site and the feed metadata it implies.
pub mod steam {
    pub const BASE_URL: &str = "https://www.counter-strike.net";
    pub const UPDATES_PATH: &str = "/news/updates";
    pub const FEED_DESCRIPTION: &str = "Counter-Strike 2 Updates Feed";
    pub const AUTHOR_NAME: &str = "Valve Corporation";
    pub const AUTHOR_EMAIL: &str = "support@steampowered.com";
    pub const RIGHTS: &str = "Valve Corporation";
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Source site settings
    pub source: SourceConfig,

    /// Locales to run one pipeline invocation each for
    pub locales: Vec<LocaleConfig>,

    /// Directory holding the per-locale feed documents
    pub feeds_dir: PathBuf,

    /// Public base URL under which the written documents are served; used
    /// for the channel self link
    pub public_feed_base_url: String,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            locales: default_locales(),
            feeds_dir: PathBuf::from("feeds"),
            public_feed_base_url:
                "https://raw.githubusercontent.com/danielpleixats/cs2-feed-xml-gen/refs/heads/main/feeds"
                    .to_string(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration: defaults, overlaid by the JSON config file when
    /// one exists. When `GITHUB_WORKSPACE` is set (Actions checkout), feeds
    /// are written inside that workspace so the run can commit them.
    pub async fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("invalid config file {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to read config file {}", path.display())));
            }
        };

        if let Some(workspace) = std::env::var_os("GITHUB_WORKSPACE") {
            config.feeds_dir = PathBuf::from(workspace).join("feeds");
        }

        Ok(config)
    }

    /// The public URL of one locale's written feed document.
    #[must_use]
    pub fn public_feed_url(&self, locale_code: &str) -> String {
        format!(
            "{}/updates-feed-{}.xml",
            self.public_feed_base_url.trim_end_matches('/'),
            locale_code
        )
    }
}

/// Source site settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub updates_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: steam::BASE_URL.to_string(),
            updates_path: steam::UPDATES_PATH.to_string(),
        }
    }
}

impl SourceConfig {
    /// The updates page URL for one locale, annotated with its language.
    #[must_use]
    pub fn updates_url(&self, language_name: &str) -> String {
        format!(
            "{}{}?l={}",
            self.base_url.trim_end_matches('/'),
            self.updates_path,
            language_name
        )
    }
}

/// One supported locale: the human-readable language name the site expects
/// as a query parameter, the two-letter code keying the written document,
/// and the full locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub name: String,
    pub code: String,
    pub tag: String,
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            name: "english".to_string(),
            code: "en".to_string(),
            tag: "en_US".to_string(),
        },
        LocaleConfig {
            name: "german".to_string(),
            code: "de".to_string(),
            tag: "de_DE".to_string(),
        },
    ]
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum retry attempts for transient fetch failures
    pub max_retries: u32,

    /// Delay between retries in milliseconds
    pub retry_delay_ms: u64,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            max_retries: 2,
            retry_delay_ms: 1500,
            user_agent: format!("cs2-updates-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` wins when set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
