//! Cluster lifecycle: bring a local cluster up, tear it down
//!
//! `up` is idempotent: install k3d if missing, and only when the cluster does
//! not exist yet create it, export its kubeconfig, install the ingress
//! controller and patch the hosts file.

use deployer_core::{CommandRunner, DeployerConfig, HostsFile, HostsPatch};
use tracing::{info, warn};

use crate::error::Result;
use crate::ingress;
use crate::k3d::K3d;
use crate::kubeconfig;

/// What `up` found or did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterOutcome {
    AlreadyRunning,
    Created,
}

/// What `down` found or did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyOutcome {
    K3dMissing,
    NotFound,
    Deleted,
}

/// Create `name` unless it already exists
pub fn up<R: CommandRunner>(
    runner: &R,
    name: &str,
    config: &DeployerConfig,
) -> Result<ClusterOutcome> {
    let k3d = K3d::new(runner);
    k3d.ensure_installed()?;

    if k3d.cluster_exists(name) {
        info!("{} cluster is already running.", name);
        return Ok(ClusterOutcome::AlreadyRunning);
    }

    info!("{} cluster is not running. Starting a new cluster...", name);
    k3d.create(name, &config.cluster)?;
    kubeconfig::export(&k3d, name, &config.kubeconfig_path)?;

    if config.ingress.enabled {
        ingress::install(runner, name, &config.ingress)?;
        patch_hosts(name, config);
        info!("Ingress controller installed successfully.");
    }

    Ok(ClusterOutcome::Created)
}

/// Delete `name` if k3d is installed and the cluster exists
pub fn down<R: CommandRunner>(runner: &R, name: &str) -> Result<DestroyOutcome> {
    let k3d = K3d::new(runner);

    if !k3d.is_installed() {
        info!("k3d is not installed.");
        return Ok(DestroyOutcome::K3dMissing);
    }

    if !k3d.cluster_exists(name) {
        info!("Cluster {} is not running or doesn't exist.", name);
        return Ok(DestroyOutcome::NotFound);
    }

    info!("Deleting k3d cluster {}...", name);
    k3d.delete(name)?;
    info!("Cluster {} has been successfully deleted.", name);

    Ok(DestroyOutcome::Deleted)
}

/// Map `<name>.<suffix>` to the loopback address; failures only warn
fn patch_hosts(name: &str, config: &DeployerConfig) {
    let hosts = HostsFile::new(&config.hosts.path);
    let hostname = config.cluster_hostname(name);

    match hosts.ensure_entry(&config.hosts.address, &hostname) {
        Ok(HostsPatch::AlreadyPresent) => {
            info!("{} already contains entry for {}", hosts.path().display(), hostname)
        }
        Ok(HostsPatch::Added { entry }) => {
            info!("Added '{}' to {}", entry, hosts.path().display())
        }
        Err(e) => warn!("Could not patch {}: {}", hosts.path().display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployer_core::MockRunner;
    use std::path::Path;

    const KUBECONFIG: &str = "apiVersion: v1\nkind: Config\n";

    fn config_in(dir: &Path) -> DeployerConfig {
        let mut config = DeployerConfig::default();
        config.kubeconfig_path = dir.join("kubeconfig.yaml");
        config.hosts.path = dir.join("hosts");
        std::fs::write(&config.hosts.path, "127.0.0.1 localhost\n").unwrap();
        config
    }

    #[test]
    fn test_up_creates_missing_cluster() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME SERVERS\n")
            .respond("k3d kubeconfig get", KUBECONFIG);

        let outcome = up(&runner, "local", &config).unwrap();

        assert_eq!(outcome, ClusterOutcome::Created);
        assert_eq!(runner.count("k3d cluster create local"), 1);
        assert_eq!(runner.count("helm upgrade --install ingress-nginx"), 1);
        assert_eq!(
            std::fs::read_to_string(&config.kubeconfig_path).unwrap(),
            KUBECONFIG
        );

        let hosts = std::fs::read_to_string(&config.hosts.path).unwrap();
        assert!(hosts.ends_with("\n127.0.0.1 local.k3d.host\n"));
    }

    #[test]
    fn test_up_without_ingress_skips_helm_and_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.ingress.enabled = false;
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\n")
            .respond("k3d kubeconfig get", KUBECONFIG);

        up(&runner, "dev", &config).unwrap();

        assert!(!runner.ran("helm"));
        let hosts = std::fs::read_to_string(&config.hosts.path).unwrap();
        assert_eq!(hosts, "127.0.0.1 localhost\n");
    }

    #[test]
    fn test_up_twice_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.ingress.enabled = false;

        let before = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\n")
            .respond("k3d kubeconfig get", KUBECONFIG);
        assert_eq!(up(&before, "local", &config).unwrap(), ClusterOutcome::Created);

        let after = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\nlocal 1/1 1/1 true\n");
        assert_eq!(
            up(&after, "local", &config).unwrap(),
            ClusterOutcome::AlreadyRunning
        );
        assert!(!after.ran("k3d cluster create"));
        assert!(!after.ran("helm"));
    }

    #[test]
    fn test_up_installs_k3d_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let runner = MockRunner::new().respond("k3d cluster list", "NAME\nlocal 1/1\n");

        up(&runner, "local", &config).unwrap();

        assert_eq!(runner.command_lines()[0], format!("sh -c {}", crate::k3d::INSTALL_SCRIPT));
    }

    #[test]
    fn test_create_failure_stops_flow() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\n")
            .fail("k3d cluster create", "docker daemon not running");

        assert!(up(&runner, "local", &config).is_err());
        assert!(!runner.ran("k3d kubeconfig"));
        assert!(!config.kubeconfig_path.exists());
    }

    #[test]
    fn test_hosts_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.hosts.path = dir.path().join("missing").join("hosts");
        patch_hosts("local", &config);
        assert!(!config.hosts.path.exists());
    }

    #[test]
    fn test_down() {
        let runner = MockRunner::new();
        assert_eq!(down(&runner, "local").unwrap(), DestroyOutcome::K3dMissing);
        assert!(runner.calls().is_empty());

        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\nother 1/1\n");
        assert_eq!(down(&runner, "local").unwrap(), DestroyOutcome::NotFound);
        assert!(!runner.ran("k3d cluster delete"));

        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\nlocal 1/1\n");
        assert_eq!(down(&runner, "local").unwrap(), DestroyOutcome::Deleted);
        assert_eq!(runner.count("k3d cluster delete local"), 1);
    }
}
