//! Backwards-compatible platform status lookup.

use crate::errors::ResolveError;
use crate::fetch::ClusterReader;
use crate::infrastructure::{
    AwsPlatformStatus, InfrastructureStatus, PlatformStatus, PlatformType,
};
use serde::Deserialize;

/// Namespace holding the deprecated bootstrap configuration.
pub const CLUSTER_CONFIG_NAMESPACE: &str = "kube-system";
/// Name of the configmap carrying the deprecated install-config.
pub const CLUSTER_CONFIG_NAME: &str = "cluster-config-v1";
/// Configmap key the install-config document is stored under.
pub const INSTALL_CONFIG_KEY: &str = "install-config";

/// Minimal projection of the install-config document. Everything except
/// `platform.aws.region` is ignored; any missing or null node along that
/// path yields an empty region.
#[derive(Deserialize)]
struct InstallConfig {
    #[serde(default)]
    platform: Option<InstallConfigPlatform>,
}

#[derive(Deserialize)]
struct InstallConfigPlatform {
    #[serde(default)]
    aws: Option<InstallConfigAws>,
}

#[derive(Deserialize)]
struct InstallConfigAws {
    #[serde(default)]
    region: Option<String>,
}

impl InstallConfig {
    fn aws_region(self) -> String {
        self.platform
            .and_then(|platform| platform.aws)
            .and_then(|aws| aws.region)
            .unwrap_or_default()
    }
}

/// Fetches the infrastructure status for the cluster.
pub async fn infrastructure_status<R>(reader: &R) -> Result<InfrastructureStatus, ResolveError>
where
    R: ClusterReader + ?Sized,
{
    let infra = reader
        .infrastructure()
        .await
        .map_err(|source| ResolveError::Fetch {
            resource: format!("infrastructure {}", crate::fetch::INFRASTRUCTURE_NAME),
            source,
        })?;
    Ok(infra.status.unwrap_or_default())
}

/// Looks up the platform status for a cluster in a backwards-compatible
/// way.
///
/// Clusters originally installed before 4.2 on AWS expose the region only
/// through the deprecated install-config. Non-AWS clusters and clusters
/// installed on 4.2 or later expose it via the infrastructure resource,
/// in which case the status is returned as-is without touching the
/// cluster again.
pub async fn platform_status<R>(
    reader: &R,
    infra_status: &InfrastructureStatus,
) -> Result<PlatformStatus, ResolveError>
where
    R: ClusterReader + ?Sized,
{
    if let Some(status) = &infra_status.platform_status {
        // Only AWS needs backwards compatibility with install-config
        if status.type_ != PlatformType::Aws {
            return Ok(status.clone());
        }

        // Check whether the cluster config is already migrated
        if let Some(aws) = &status.aws {
            if !aws.region.is_empty() {
                return Ok(status.clone());
            }
        }
    }

    // Otherwise build a platform status from the deprecated install-config
    let resource = format!(
        "configmap {}/{}",
        CLUSTER_CONFIG_NAMESPACE, CLUSTER_CONFIG_NAME
    );
    let cluster_config = reader
        .config_map(CLUSTER_CONFIG_NAMESPACE, CLUSTER_CONFIG_NAME)
        .await
        .map_err(|source| ResolveError::Fetch {
            resource: resource.clone(),
            source,
        })?;
    let raw = cluster_config
        .data
        .as_ref()
        .and_then(|data| data.get(INSTALL_CONFIG_KEY))
        .ok_or(ResolveError::MissingInstallConfig {
            resource,
            key: INSTALL_CONFIG_KEY,
        })?;
    let install_config: InstallConfig =
        serde_yaml::from_str(raw).map_err(|source| ResolveError::InvalidInstallConfig {
            raw: raw.clone(),
            source,
        })?;

    Ok(PlatformStatus {
        // The legacy tag is trusted as-is; pre-4.2 clusters carry nothing
        // else to cross-check it against.
        type_: infra_status.platform,
        aws: Some(AwsPlatformStatus {
            region: install_config.aws_region(),
        }),
        ..Default::default()
    })
}

/// Checks if `platform` is one of `supported`.
pub fn is_platform_supported(platform: PlatformType, supported: &[PlatformType]) -> bool {
    supported.contains(&platform)
}
