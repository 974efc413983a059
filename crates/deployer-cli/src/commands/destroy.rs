//! Destroy command - delete a local k3d cluster

use console::style;
use deployer_core::CommandRunner;
use deployer_kube::DestroyOutcome;
use deployer_kube::cluster;

use crate::display;
use crate::error::Result;

/// Run the destroy command
pub fn run<R: CommandRunner>(runner: &R, name: &str) -> Result<()> {
    match cluster::down(runner, name)? {
        DestroyOutcome::K3dMissing => display::warning("k3d is not installed, nothing to delete"),
        DestroyOutcome::NotFound => display::warning(&format!(
            "Cluster {} is not running or doesn't exist",
            style(name).cyan()
        )),
        DestroyOutcome::Deleted => {
            display::success(&format!("Cluster {} deleted", style(name).cyan()))
        }
    }
    Ok(())
}
