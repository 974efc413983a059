//! Cluster command - create a local k3d cluster

use console::style;
use deployer_core::{CommandRunner, DeployerConfig};
use deployer_kube::ClusterOutcome;
use deployer_kube::cluster;

use crate::display;
use crate::error::Result;

/// Run the cluster command
pub fn run<R: CommandRunner>(runner: &R, name: &str, config: &DeployerConfig) -> Result<()> {
    display::step(&format!("Ensuring cluster {}...", style(name).cyan()));

    match cluster::up(runner, name, config)? {
        ClusterOutcome::AlreadyRunning => {
            display::success(&format!("Cluster {} is already running", style(name).cyan()));
        }
        ClusterOutcome::Created => {
            display::success(&format!("Cluster {} created", style(name).cyan()));
            if config.ingress.enabled {
                println!(
                    "  Ingress: http://{}",
                    style(config.cluster_hostname(name)).underlined()
                );
            }
            println!(
                "  Kubeconfig: {}",
                style(config.kubeconfig_path.display()).yellow()
            );
            println!();
            println!(
                "  export KUBECONFIG={}",
                config.kubeconfig_path.display()
            );
        }
    }

    Ok(())
}
