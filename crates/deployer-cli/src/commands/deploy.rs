//! Deploy command - install or upgrade a Helm chart in a cluster

use std::path::PathBuf;

use console::style;
use deployer_core::CommandRunner;
use deployer_kube::{DeployRequest, deploy_chart};

use crate::display;
use crate::error::Result;

/// Command-line options of `deployer deploy`
#[derive(Debug, Clone)]
pub struct DeployArgs {
    pub chart: String,
    pub namespace: String,
    pub values: Option<PathBuf>,
    pub repo: Option<String>,
    pub version: Option<String>,
}

/// Run the deploy command
pub fn run<R: CommandRunner>(runner: &R, cluster: &str, args: DeployArgs) -> Result<()> {
    display::step(&format!(
        "Deploying {} to cluster {}...",
        style(&args.chart).cyan(),
        style(cluster).cyan()
    ));

    let request = DeployRequest {
        chart: args.chart,
        namespace: args.namespace,
        values_file: args.values,
        repo: args.repo,
        version: args.version,
    };
    let chart = deploy_chart(runner, cluster, &request)?;

    display::success(&format!(
        "Release {} deployed to namespace {}",
        style(&chart.name).cyan(),
        style(&request.namespace).yellow()
    ));

    Ok(())
}
