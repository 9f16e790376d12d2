use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobboard_parser::{export_to_path, Driver, HttpFetcher, ScraperConfig};

/// Optional path to a JSON config file
const CONFIG_ENV: &str = "JOBBOARD_CONFIG";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobboard_parser=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => ScraperConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.to_string_lossy()))?,
        None => ScraperConfig::default(),
    };
    tracing::info!(base_url = %config.base_url, "starting scrape");

    let fetcher = HttpFetcher::new(&config);
    let export = config.export.clone();
    let driver = Driver::new(fetcher, config).context("Invalid configuration")?;

    let records = driver.run();
    export_to_path(&records, &export)
        .with_context(|| format!("Failed to write {}", export.path.display()))?;

    Ok(())
}
