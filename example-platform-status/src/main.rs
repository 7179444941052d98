use anyhow::Context as _;
use platform_utils::fetch::KubeReader;
use platform_utils::infrastructure::PlatformType;
use std::str::FromStr;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    tracing::info!("Connecting to cluster");
    let k = platform_utils::client::platform_status_client().await?;

    let reader = KubeReader::with_deadline(k, Duration::from_secs(30));
    let infra_status = platform_utils::platform::infrastructure_status(&reader).await?;
    tracing::info!(platform = %infra_status.platform, "Legacy platform tag");

    let status = platform_utils::platform::platform_status(&reader, &infra_status).await?;
    tracing::info!(platform = %status.type_, "Resolved platform status");
    if let Some(aws) = &status.aws {
        tracing::info!(region = aws.region.as_str(), "AWS region");
    }

    let supported = supported_platforms()?;
    tracing::info!(
        supported = platform_utils::platform::is_platform_supported(status.type_, &supported),
        "Platform membership in SUPPORTED_PLATFORMS"
    );
    Ok(())
}

/// Reads the supported set from `SUPPORTED_PLATFORMS` (comma-separated
/// platform tags), defaulting to the major clouds.
fn supported_platforms() -> anyhow::Result<Vec<PlatformType>> {
    match std::env::var("SUPPORTED_PLATFORMS") {
        Ok(raw) => raw
            .split(',')
            .map(|p| PlatformType::from_str(p.trim()))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid SUPPORTED_PLATFORMS"),
        Err(_) => Ok(vec![
            PlatformType::Aws,
            PlatformType::Azure,
            PlatformType::Gcp,
        ]),
    }
}
