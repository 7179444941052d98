//! Construction of the cluster client used for platform lookups.

use anyhow::Context as _;
use std::convert::TryFrom;

/// Builds a client capable of retrieving the items necessary to determine
/// the platform status.
///
/// Configuration is inferred: the in-cluster environment is tried first,
/// the local kubeconfig otherwise. Build the client once at process start
/// and reuse it across calls.
pub async fn platform_status_client() -> anyhow::Result<kube::Client> {
    let config = kube::Config::infer()
        .await
        .context("failed to infer kube config")?;
    kube::Client::try_from(config).context("failed to build kube client")
}
