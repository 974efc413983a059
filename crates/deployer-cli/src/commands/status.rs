//! Status command - show the pods of a cluster

use console::style;
use deployer_core::CommandRunner;
use deployer_kube::list_pods;

use crate::display::{self, PodTable};
use crate::error::{CliError, Result};

/// Run the status command
///
/// `namespace` is `None` for all namespaces.
pub fn run<R: CommandRunner>(
    runner: &R,
    cluster: &str,
    namespace: Option<&str>,
    output_json: bool,
) -> Result<()> {
    let pods = list_pods(runner, cluster, namespace)?;

    if output_json {
        let json = serde_json::to_string_pretty(&pods)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    let scope = match namespace {
        Some(ns) => format!("namespace {}", style(ns).yellow()),
        None => "all namespaces".to_string(),
    };

    if pods.is_empty() {
        display::warning(&format!("No pods found in {}", scope));
        return Ok(());
    }

    println!(
        "{} in {} of cluster {}",
        display::pluralize(pods.len(), "pod", "pods"),
        scope,
        style(cluster).cyan()
    );
    println!();
    PodTable::new(&pods, namespace.is_none()).render(&mut std::io::stdout().lock())?;

    let unhealthy = pods.iter().filter(|p| !p.is_healthy()).count();
    if unhealthy > 0 {
        println!();
        display::warning(&format!(
            "{} not ready",
            display::pluralize(unhealthy, "pod is", "pods are")
        ));
    }

    Ok(())
}
