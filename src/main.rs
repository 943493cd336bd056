use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use aws_config::{timeout::TimeoutConfig, BehaviorVersion};
use dotenvy::dotenv;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use logship::config::Config;
use logship::runner;
use logship::uploader::CwUploader;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let cfg_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = Config::load(cfg_path)?;
    info!(
        targets = cfg.targets.len(),
        region = %cfg.region,
        "starting logship"
    );

    let aws_cfg = create_aws_config(&cfg).await;
    verify_credentials(&aws_cfg).await?;

    let client = aws_sdk_cloudwatchlogs::Client::new(&aws_cfg);
    let sink = CwUploader::new(client);

    let summary = runner::run(&cfg, &sink).await?;
    info!(
        uploaded = summary.files_uploaded,
        failed = summary.files_failed,
        skipped_targets = summary.targets_skipped,
        "logship finished"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();
}

async fn create_aws_config(cfg: &Config) -> aws_config::SdkConfig {
    let timeout_config = TimeoutConfig::builder()
        .connect_timeout(Duration::from_secs(10))
        .operation_timeout(cfg.http_timeout())
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(aws_sdk_cloudwatchlogs::config::Region::new(
            cfg.region.to_string(),
        ))
        .timeout_config(timeout_config);
    if let Some(profile) = &cfg.aws_profile {
        loader = loader.profile_name(profile.as_ref());
    }
    loader.load().await
}

/// Resolve credentials once up front so a bad profile ends the run before
/// anything is uploaded.
async fn verify_credentials(aws_cfg: &aws_config::SdkConfig) -> Result<()> {
    use aws_sdk_cloudwatchlogs::config::ProvideCredentials;

    let provider = aws_cfg
        .credentials_provider()
        .context("no credentials provider configured")?;
    provider
        .provide_credentials()
        .await
        .context("credential resolution failed")?;
    info!("credentials resolved");
    Ok(())
}
