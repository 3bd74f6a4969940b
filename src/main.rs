//! Command-line entry point: build a creator report for one token mint and
//! print it as JSON.
//!
//! Configuration comes from the environment: `LAUNCHPAD_API_KEY` (required),
//! `SOCIAL_API_HOST` and `SOCIAL_API_KEY` (optional, enrichment is skipped
//! without them), plus optional overrides like `LAUNCHPAD_API_URL` and
//! `CACHE_TTL_SECONDS`.

use anyhow::{Context, Result};
use creatorscope::aggregator::{AggregatorConfig, CreatorAggregator, HttpDataSources};
use std::sync::Arc;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let mint = std::env::args()
        .nth(1)
        .context("usage: creatorscope <token-mint>")?;

    let config = AggregatorConfig::from_env();
    if config.social_api_host.is_none() || config.social_api_key.is_none() {
        info!("social API not configured, creators will not be enriched");
    }

    let provider = Arc::new(HttpDataSources::new(config.clone())?);
    let aggregator = CreatorAggregator::new(provider, config);

    let report = aggregator.report(&mint).await?;
    info!(
        creators = report.creators.len(),
        suggestions = report.network.len(),
        "report assembled"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
