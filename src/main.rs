//! CLI entry point: run the feed pipeline once for every configured locale.

use anyhow::Result;
use tracing::info;

use cs2_updates_feed::application::pipeline::FeedPipeline;
use cs2_updates_feed::infrastructure::config::AppConfig;
use cs2_updates_feed::infrastructure::feed_store::FileFeedStore;
use cs2_updates_feed::infrastructure::http_client::HttpClient;
use cs2_updates_feed::infrastructure::logging::init_logging;
use cs2_updates_feed::infrastructure::update_extractor::SteamUpdateExtractor;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().await?;
    init_logging(&config.logging)?;

    info!(
        locales = config.locales.len(),
        feeds_dir = %config.feeds_dir.display(),
        "cs2-updates-feed starting"
    );

    let http = HttpClient::new(&config.http)?;
    let extractor = SteamUpdateExtractor::new(http, config.source.clone());
    let store = FileFeedStore::new(config.feeds_dir.clone());

    let pipeline = FeedPipeline::new(config, extractor, store);
    let outcomes = pipeline.run_all().await;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if !outcomes.is_empty() && failed == outcomes.len() {
        anyhow::bail!("all {failed} locale runs failed");
    }
    if failed > 0 {
        info!(failed, "finished with some locales failed");
    } else {
        info!("finished");
    }
    Ok(())
}
