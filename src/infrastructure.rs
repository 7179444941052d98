//! Projections of the `config.openshift.io/v1` infrastructure types.

use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// The platform type tag carried by the infrastructure resource.
///
/// Values match the wire strings used by the cluster API. Older clusters
/// may report an empty string, which is treated as `None`.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
pub enum PlatformType {
    #[serde(rename = "AWS")]
    #[strum(serialize = "AWS")]
    Aws,
    Azure,
    BareMetal,
    #[serde(rename = "GCP")]
    #[strum(serialize = "GCP")]
    Gcp,
    #[serde(rename = "IBMCloud")]
    #[strum(serialize = "IBMCloud")]
    IbmCloud,
    Libvirt,
    #[serde(rename = "None", alias = "")]
    None,
    OpenStack,
    #[serde(rename = "oVirt")]
    #[strum(serialize = "oVirt")]
    Ovirt,
    VSphere,
}

impl Default for PlatformType {
    fn default() -> Self {
        PlatformType::None
    }
}

/// Reference to a key inside a configmap, carried by the infrastructure
/// spec for platforms that need an operator-managed cloud config.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapFileReference {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
}

/// The cluster-scoped infrastructure resource. The cluster exposes exactly
/// one instance, named `cluster`.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Infrastructure",
    status = "InfrastructureStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_config: Option<ConfigMapFileReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    #[serde(default)]
    pub infrastructure_name: String,
    #[serde(default, rename = "apiServerURL")]
    pub api_server_url: String,
    /// Deprecated platform tag. Kept because pre-4.2 clusters fill only
    /// this field; prefer `platform_status`.
    #[serde(default)]
    pub platform: PlatformType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_status: Option<PlatformStatus>,
}

/// Structured description of the underlying platform. Only the variant
/// matching `type` is populated; the rest stay `None`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    #[serde(rename = "type", default)]
    pub type_: PlatformType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzurePlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baremetal: Option<BareMetalPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpPlatformStatus>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwsPlatformStatus {
    #[serde(default)]
    pub region: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzurePlatformStatus {
    #[serde(default)]
    pub resource_group_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BareMetalPlatformStatus {
    #[serde(default, rename = "apiServerInternalIP")]
    pub api_server_internal_ip: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GcpPlatformStatus {
    #[serde(default, rename = "projectID")]
    pub project_id: String,
    #[serde(default)]
    pub region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_type_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&PlatformType::Aws).unwrap(), "\"AWS\"");
        assert_eq!(
            serde_json::from_str::<PlatformType>("\"GCP\"").unwrap(),
            PlatformType::Gcp
        );
        assert_eq!(PlatformType::Ovirt.to_string(), "oVirt");
        assert_eq!("AWS".parse::<PlatformType>().unwrap(), PlatformType::Aws);
    }

    #[test]
    fn empty_platform_tag_means_none() {
        assert_eq!(
            serde_json::from_str::<PlatformType>("\"\"").unwrap(),
            PlatformType::None
        );
        assert_eq!(PlatformType::default(), PlatformType::None);
    }

    #[test]
    fn platform_status_deserializes_the_structured_form() {
        let status: PlatformStatus =
            serde_json::from_str(r#"{"type":"AWS","aws":{"region":"us-east-1"}}"#).unwrap();
        assert_eq!(status.type_, PlatformType::Aws);
        assert_eq!(status.aws.unwrap().region, "us-east-1");
        assert!(status.gcp.is_none());
    }

    #[test]
    fn infrastructure_status_tolerates_missing_fields() {
        let status: InfrastructureStatus = serde_json::from_str(r#"{"platform":"GCP"}"#).unwrap();
        assert_eq!(status.platform, PlatformType::Gcp);
        assert!(status.platform_status.is_none());
        assert_eq!(status.infrastructure_name, "");
    }
}
