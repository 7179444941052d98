//! Read access to the cluster resources platform resolution needs.

use crate::errors::{classify_kube, ErrorClass, FetchError};
use crate::infrastructure::Infrastructure;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::Api;
use std::fmt::Debug;
use std::time::Duration;

/// Name of the singleton infrastructure resource.
pub const INFRASTRUCTURE_NAME: &str = "cluster";

/// Get-by-name read access to the resources needed for platform
/// resolution.
///
/// The resolution logic only depends on this trait, so it can run against
/// anything that answers two reads; in particular tests do not need a live
/// apiserver.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// Fetches the singleton infrastructure resource.
    async fn infrastructure(&self) -> Result<Infrastructure, FetchError>;
    /// Fetches a single configmap by namespace and name.
    async fn config_map(&self, namespace: &str, name: &str) -> Result<ConfigMap, FetchError>;
}

/// [`ClusterReader`] backed by a live cluster connection.
///
/// The wrapped client is internally synchronized, so one reader may be
/// shared between concurrent callers.
#[derive(Clone)]
pub struct KubeReader {
    client: kube::Client,
    deadline: Option<Duration>,
}

impl KubeReader {
    pub fn new(client: kube::Client) -> Self {
        KubeReader {
            client,
            deadline: None,
        }
    }

    /// Like [`KubeReader::new`], but every individual fetch is abandoned
    /// with [`FetchError::DeadlineExceeded`] once `deadline` elapses.
    pub fn with_deadline(client: kube::Client, deadline: Duration) -> Self {
        KubeReader {
            client,
            deadline: Some(deadline),
        }
    }

    async fn bounded_get<K>(
        &self,
        api: Api<K>,
        kind: &'static str,
        name: &str,
        id: &str,
    ) -> Result<K, FetchError>
    where
        K: Clone + Debug + serde::de::DeserializeOwned,
    {
        tracing::debug!(kind, id, "fetching resource");
        let get = api.get(name);
        let result = match self.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, get).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(FetchError::DeadlineExceeded {
                        kind,
                        id: id.to_string(),
                    })
                }
            },
            None => get.await,
        };
        result.map_err(|err| match classify_kube(&err) {
            ErrorClass::NotFound => FetchError::NotFound {
                kind,
                id: id.to_string(),
            },
            _ => FetchError::Transport {
                kind,
                id: id.to_string(),
                source: Box::new(err),
            },
        })
    }
}

#[async_trait]
impl ClusterReader for KubeReader {
    async fn infrastructure(&self) -> Result<Infrastructure, FetchError> {
        let api = Api::<Infrastructure>::all(self.client.clone());
        self.bounded_get(api, "infrastructure", INFRASTRUCTURE_NAME, INFRASTRUCTURE_NAME)
            .await
    }

    async fn config_map(&self, namespace: &str, name: &str) -> Result<ConfigMap, FetchError> {
        let api = Api::<ConfigMap>::namespaced(self.client.clone(), namespace);
        let id = format!("{}/{}", namespace, name);
        self.bounded_get(api, "configmap", name, &id).await
    }
}
