//! Error types for deployer-kube

use deployer_core::CoreError;
use thiserror::Error;

/// Result type for deployer-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur while driving the local cluster
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// External command, platform or chart error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Cluster does not exist
    #[error("cluster '{name}' is not running\nHint: Run `deployer cluster {name}` to create it")]
    ClusterNotFound { name: String },

    /// k3d binary is missing
    #[error("k3d is not installed\nHint: Run `deployer cluster` to install it")]
    K3dNotInstalled,

    /// k3d returned an empty kubeconfig
    #[error("k3d returned an empty kubeconfig for cluster '{name}'")]
    EmptyKubeconfig { name: String },

    /// kubectl output could not be decoded
    #[error("failed to decode pod list: {0}")]
    PodList(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for KubeError {
    fn from(e: serde_json::Error) -> Self {
        KubeError::PodList(e.to_string())
    }
}

impl From<serde_yaml::Error> for KubeError {
    fn from(e: serde_yaml::Error) -> Self {
        KubeError::Serialization(e.to_string())
    }
}

impl KubeError {
    /// Check if the cluster is missing
    pub fn is_cluster_not_found(&self) -> bool {
        matches!(self, KubeError::ClusterNotFound { .. } | KubeError::K3dNotInstalled)
    }
}
