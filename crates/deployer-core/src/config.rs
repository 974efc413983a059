//! Deployer configuration
//!
//! Read from `~/.config/deployer/config.yaml` when present. Every key is
//! optional and falls back to the built-in defaults; command-line flags win
//! over both.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::hosts::HOSTS_PATH;

/// Top-level configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployerConfig {
    /// Cluster used when no name is given on the command line
    pub default_cluster: String,

    /// Where the kubeconfig of a newly created cluster is written
    pub kubeconfig_path: PathBuf,

    pub cluster: ClusterSettings,

    pub hosts: HostsSettings,

    pub ingress: IngressSettings,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            default_cluster: "local".to_string(),
            kubeconfig_path: PathBuf::from("/tmp/kubeconfig.yaml"),
            cluster: ClusterSettings::default(),
            hosts: HostsSettings::default(),
            ingress: IngressSettings::default(),
        }
    }
}

impl DeployerConfig {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/deployer/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("deployer").join("config.yaml"))
    }

    /// Hostname patched into the hosts file for `cluster`
    pub fn cluster_hostname(&self, cluster: &str) -> String {
        format!("{}.{}", cluster, self.hosts.domain_suffix)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(CoreError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.default_cluster.trim().is_empty() {
            return invalid("defaultCluster must not be empty");
        }
        if self.hosts.domain_suffix.trim().is_empty() {
            return invalid("hosts.domainSuffix must not be empty");
        }
        if self.ingress.http_node_port == self.ingress.https_node_port {
            return invalid("ingress.httpNodePort and ingress.httpsNodePort must differ");
        }
        Ok(())
    }
}

/// Shape of a newly created k3d cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSettings {
    /// Number of agent nodes
    pub agents: u32,

    /// `--port` mappings passed to `k3d cluster create`
    pub ports: Vec<String>,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            agents: 1,
            ports: vec![
                "80:80@loadbalancer".to_string(),
                "443:443@loadbalancer".to_string(),
                // NodePort for HTTP
                "30080:80@loadbalancer".to_string(),
                // NodePort for HTTPS
                "30443:443@loadbalancer".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostsSettings {
    pub path: PathBuf,
    pub address: String,
    pub domain_suffix: String,
}

impl Default for HostsSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(HOSTS_PATH),
            address: "127.0.0.1".to_string(),
            domain_suffix: "k3d.host".to_string(),
        }
    }
}

/// Ingress controller installed into every new cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngressSettings {
    pub enabled: bool,
    pub repo: String,
    pub chart: String,
    pub namespace: String,
    pub http_node_port: u16,
    pub https_node_port: u16,
}

impl Default for IngressSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            repo: "https://kubernetes.github.io/ingress-nginx".to_string(),
            chart: "ingress-nginx".to_string(),
            namespace: "ingress-nginx".to_string(),
            http_node_port: 30080,
            https_node_port: 30443,
        }
    }
}
