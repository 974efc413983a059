//! k3d: k3s clusters running as Docker containers

use deployer_core::{ClusterSettings, CommandRunner, Invocation};
use tracing::{info, warn};

use crate::error::{KubeError, Result};

const K3D: &str = "k3d";

/// Upstream install script, piped to bash
pub const INSTALL_SCRIPT: &str =
    "curl -s https://raw.githubusercontent.com/k3d-io/k3d/main/install.sh | bash";

/// Thin wrapper over the `k3d` binary
#[derive(Debug, Clone)]
pub struct K3d<R> {
    runner: R,
}

impl<R: CommandRunner> K3d<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Whether `k3d` is on PATH
    pub fn is_installed(&self) -> bool {
        self.runner.locate(K3D).is_some()
    }

    /// Run the upstream install script
    pub fn install(&self) -> Result<()> {
        self.runner.run(&Invocation::shell(INSTALL_SCRIPT))?;
        info!("k3d has been successfully installed.");
        Ok(())
    }

    /// Install k3d unless present; true if it was installed now
    pub fn ensure_installed(&self) -> Result<bool> {
        if self.is_installed() {
            info!("k3d is already installed.");
            return Ok(false);
        }
        info!("k3d is not installed. Starting installation...");
        self.install()?;
        Ok(true)
    }

    /// Whether `k3d cluster list` shows `name`
    ///
    /// A failing list command is logged and reported as "not running".
    pub fn cluster_exists(&self, name: &str) -> bool {
        let list = Invocation::new(K3D).args(["cluster", "list"]);
        match self.runner.output(&list) {
            Ok(output) => list_contains(&output.stdout, name),
            Err(e) => {
                warn!("Failed to check k3d clusters: {}", e);
                false
            }
        }
    }

    /// `k3d cluster create`
    pub fn create(&self, name: &str, settings: &ClusterSettings) -> Result<()> {
        self.runner.run(&create_invocation(name, settings))?;
        info!("{} cluster has been successfully created.", name);
        Ok(())
    }

    /// `k3d cluster delete`
    pub fn delete(&self, name: &str) -> Result<()> {
        self.runner
            .run(&Invocation::new(K3D).args(["cluster", "delete", name]))?;
        Ok(())
    }

    /// Kubeconfig content for `name`, from `k3d kubeconfig get`
    pub fn kubeconfig(&self, name: &str) -> Result<String> {
        let output = self
            .runner
            .output(&Invocation::new(K3D).args(["kubeconfig", "get", name]))?;

        if output.stdout.trim().is_empty() {
            return Err(KubeError::EmptyKubeconfig {
                name: name.to_string(),
            });
        }
        Ok(output.stdout)
    }
}

/// Arguments for `k3d cluster create`
pub fn create_invocation(name: &str, settings: &ClusterSettings) -> Invocation {
    let mut invocation = Invocation::new(K3D).args(["cluster", "create", name]);
    for port in &settings.ports {
        invocation = invocation.arg("--port").arg(port);
    }
    invocation
        .arg("--agents")
        .arg(settings.agents.to_string())
}

/// Whether any line of `k3d cluster list` output starts with the `name` column
pub fn list_contains(output: &str, name: &str) -> bool {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .any(|first| first == name)
}
