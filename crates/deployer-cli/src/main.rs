//! deployer - local k3d clusters with Helm deployments

use clap::{Parser, Subcommand};
use deployer_core::{ChartRef, DeployerConfig, SystemRunner, is_root};
use std::path::PathBuf;

mod commands;
mod display;
mod error;
mod exit_codes;
mod logging;

use commands::deploy::DeployArgs;
use error::{CliError, Result};

#[derive(Parser, Debug)]
#[command(name = "deployer")]
#[command(version)]
#[command(about = "Provision a local k3d cluster, deploy Helm charts into it, and tear it down", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (default: <config dir>/deployer/config.yaml)
    #[arg(long, global = true, env = "DEPLOYER_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install Docker, Helm, k9s and kubectl
    Setup,

    /// Create a local k3d cluster with an ingress controller
    Cluster {
        /// Cluster name
        name: Option<String>,
    },

    /// Install or upgrade a Helm chart in a cluster
    Deploy {
        /// Cluster name
        name: Option<String>,

        /// Chart reference (oci://registry/org/chart, repo/chart or a path)
        #[arg(long = "helm", value_name = "URI")]
        helm: String,

        /// Target namespace
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// Values file passed to helm
        #[arg(short = 'f', long = "values")]
        values: Option<PathBuf>,

        /// Chart repository URL
        #[arg(long)]
        repo: Option<String>,

        /// Chart version constraint
        #[arg(long = "chart-version")]
        chart_version: Option<String>,
    },

    /// Show the pods of a cluster
    Status {
        /// Cluster name
        name: Option<String>,

        /// Namespace to list
        #[arg(short, long, default_value = "default")]
        namespace: String,

        /// List pods in every namespace
        #[arg(short = 'A', long)]
        all_namespaces: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a local k3d cluster
    Destroy {
        /// Cluster name
        name: Option<String>,
    },
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DeployerConfig::load_from(path)?,
        None => DeployerConfig::load()?,
    };
    tracing::debug!("Configuration: {:?}", config);

    validate_input(&cli.command)?;
    require_root(is_root())?;

    let runner = SystemRunner::new();
    let cluster_name = |name: Option<String>| name.unwrap_or_else(|| config.default_cluster.clone());

    match cli.command {
        Commands::Setup => commands::setup::run(&runner),

        Commands::Cluster { name } => commands::cluster::run(&runner, &cluster_name(name), &config),

        Commands::Deploy {
            name,
            helm,
            namespace,
            values,
            repo,
            chart_version,
        } => commands::deploy::run(
            &runner,
            &cluster_name(name),
            DeployArgs {
                chart: helm,
                namespace,
                values,
                repo,
                version: chart_version,
            },
        ),

        Commands::Status {
            name,
            namespace,
            all_namespaces,
            json,
        } => commands::status::run(
            &runner,
            &cluster_name(name),
            (!all_namespaces).then_some(namespace.as_str()),
            json,
        ),

        Commands::Destroy { name } => commands::destroy::run(&runner, &cluster_name(name)),
    }
}

/// Checks that need no privileges, so bad input is reported without sudo
fn validate_input(command: &Commands) -> Result<()> {
    if let Commands::Deploy { helm, values, .. } = command {
        ChartRef::parse(helm)?;

        if let Some(values) = values
            && !values.is_file()
        {
            return Err(CliError::Io {
                message: format!("values file not found: {}", values.display()),
            });
        }
    }
    Ok(())
}

fn require_root(root: bool) -> Result<()> {
    if root {
        Ok(())
    } else {
        Err(CliError::permission(
            "This command must be run as root (effective uid 0)",
        ))
    }
}
