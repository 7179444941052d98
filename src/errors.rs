//! Error types and k8s error classification

use thiserror::Error;

/// Describes error reason
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    /// Catch-all variant. Since this enum is non-exhaustive,
    /// it should be handled with `_` pattern
    Unknown,
}

/// Tries to classify k8s error
pub fn classify(error_reason: &str) -> ErrorClass {
    match error_reason {
        "NotFound" => ErrorClass::NotFound,
        _ => ErrorClass::Unknown,
    }
}

/// Tries to classify k8s error, wrapped in kube Error
pub fn classify_kube(error: &kube::Error) -> ErrorClass {
    match error {
        kube::Error::Api(api) => classify(&api.reason),
        _ => ErrorClass::Unknown,
    }
}

/// Failure of a single remote read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("deadline exceeded while fetching {kind} {id}")]
    DeadlineExceeded { kind: &'static str, id: String },
    #[error("failed to fetch {kind} {id}")]
    Transport {
        kind: &'static str,
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure of a platform status resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The underlying read failed. A single attempt is made; nothing is
    /// retried.
    #[error("failed to get {resource}")]
    Fetch {
        resource: String,
        #[source]
        source: FetchError,
    },
    #[error("missing {key} key in {resource}")]
    MissingInstallConfig { resource: String, key: &'static str },
    /// The message keeps the raw document so operators can see exactly
    /// what failed to parse.
    #[error("invalid install-config: {source}\ninstall-config:\n{raw}")]
    InvalidInstallConfig {
        raw: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_not_found_reasons() {
        assert_eq!(classify("NotFound"), ErrorClass::NotFound);
        assert_eq!(classify("Conflict"), ErrorClass::Unknown);

        let api_err = kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: "configmaps \"cluster-config-v1\" not found".to_string(),
            reason: "NotFound".to_string(),
            code: 404,
        });
        assert_eq!(classify_kube(&api_err), ErrorClass::NotFound);
    }

    #[test]
    fn fetch_error_names_the_resource() {
        let err = FetchError::NotFound {
            kind: "configmap",
            id: "kube-system/cluster-config-v1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "configmap kube-system/cluster-config-v1 not found"
        );
    }
}
