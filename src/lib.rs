//! Utilities for working with the platform status of OpenShift-flavored
//! clusters.

pub mod client;
pub mod errors;
pub mod fetch;
pub mod infrastructure;
pub mod platform;

use anyhow::Context as _;

/// Resolves the cluster platform status end to end.
///
/// Convenience over [`platform::infrastructure_status`] and
/// [`platform::platform_status`] for callers that do not need to reuse
/// the intermediate infrastructure status.
pub async fn platform_status(
    k: &kube::Client,
) -> anyhow::Result<infrastructure::PlatformStatus> {
    let reader = fetch::KubeReader::new(k.clone());
    let infra_status = platform::infrastructure_status(&reader)
        .await
        .context("failed to get infrastructure status")?;
    let status = platform::platform_status(&reader, &infra_status)
        .await
        .context("failed to resolve platform status")?;
    Ok(status)
}
