//! Infrastructure layer for HTTP fetching, HTML extraction, feed
//! serialization, file storage, configuration and logging

pub mod config;
pub mod feed_serializer;
pub mod feed_store;
pub mod http_client;
pub mod logging;
pub mod update_extractor;

// Re-export commonly used items
pub use config::{AppConfig, LocaleConfig};
pub use feed_store::FileFeedStore;
pub use http_client::HttpClient;
pub use logging::init_logging;
pub use update_extractor::SteamUpdateExtractor;
