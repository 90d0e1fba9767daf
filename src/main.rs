// Delivery metrics CLI
//
// Computes deployment and pull request metrics for one GitHub repository and
// prints the report as JSON. Usage: delivery-metrics [config.toml]
// Environment variables override values from the config file.

use anyhow::{Context, Result};
use chrono::Utc;
use delivery_metrics::{ConfigError, GitHubClient, MetricsConfig, MetricsEngine};
use log::info;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => MetricsConfig::load(Path::new(&path))?,
        None => MetricsConfig::default(),
    }
    .apply_env()
    .context("Invalid environment configuration")?;

    let (owner, repo) = config.owner_and_repo()?;
    let token = config.token.clone().ok_or(ConfigError::MissingToken)?;
    let options = config.engine_options()?;

    let mut builder = GitHubClient::builder().personal_token(token);
    if let Some(uri) = &config.api_base_uri {
        builder = builder.base_uri(uri);
    }
    let client = builder.build().context("Failed to create GitHub client")?;

    let source = client.repository(owner, repo);
    let repository = source.full_name();
    info!("Computing {} metrics for {repository}", config.time_period);

    let engine = MetricsEngine::new(source, options);
    let mut report = engine.report(Utc::now(), &config.pull_requests).await;
    report.repository = Some(repository);

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}
