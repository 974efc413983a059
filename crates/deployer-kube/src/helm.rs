//! Helm releases: `helm upgrade --install` against a k3d cluster

use std::path::{Path, PathBuf};

use deployer_core::{ChartRef, CommandRunner, Invocation};
use tracing::info;

use crate::error::{KubeError, Result};
use crate::k3d::K3d;
use crate::kubeconfig::TempKubeconfig;

/// One `helm upgrade --install` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmRelease {
    pub name: String,
    pub chart: String,
    pub namespace: String,
    pub kubeconfig: PathBuf,
    pub repo: Option<String>,
    pub values_file: Option<PathBuf>,
    pub version: Option<String>,
}

impl HelmRelease {
    pub fn new(chart: &ChartRef, namespace: &str, kubeconfig: &Path) -> Self {
        Self {
            name: chart.name.clone(),
            chart: chart.uri.clone(),
            namespace: namespace.to_string(),
            kubeconfig: kubeconfig.to_path_buf(),
            repo: None,
            values_file: None,
            version: None,
        }
    }

    pub fn with_repo(mut self, repo: Option<&str>) -> Self {
        self.repo = repo.map(str::to_string);
        self
    }

    pub fn with_values_file(mut self, values_file: Option<&Path>) -> Self {
        self.values_file = values_file.map(Path::to_path_buf);
        self
    }

    pub fn with_version(mut self, version: Option<&str>) -> Self {
        self.version = version.map(str::to_string);
        self
    }

    /// Arguments after `helm`
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "upgrade".into(),
            "--install".into(),
            self.name.clone(),
            self.chart.clone(),
            "-n".into(),
            self.namespace.clone(),
            "--create-namespace".into(),
            "--kubeconfig".into(),
            self.kubeconfig.display().to_string(),
        ];
        if let Some(repo) = &self.repo {
            args.extend(["--repo".into(), repo.clone()]);
        }
        if let Some(values) = &self.values_file {
            args.extend(["-f".into(), values.display().to_string()]);
        }
        if let Some(version) = &self.version {
            args.extend(["--version".into(), version.clone()]);
        }
        args
    }

    pub fn invocation(&self) -> Invocation {
        Invocation::new("helm").args(self.args())
    }
}

/// Thin wrapper over the `helm` binary
#[derive(Debug, Clone)]
pub struct Helm<R> {
    runner: R,
}

impl<R: CommandRunner> Helm<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn upgrade_install(&self, release: &HelmRelease) -> Result<()> {
        let invocation = release.invocation();
        info!("Running Helm command: {}", invocation);
        self.runner.run(&invocation)?;
        Ok(())
    }
}

/// What to deploy, as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    pub chart: String,
    pub namespace: String,
    pub values_file: Option<PathBuf>,
    pub repo: Option<String>,
    pub version: Option<String>,
}

/// Install or upgrade a chart in `cluster`, which must already exist
pub fn deploy_chart<R: CommandRunner>(
    runner: &R,
    cluster: &str,
    request: &DeployRequest,
) -> Result<ChartRef> {
    let chart = ChartRef::parse(&request.chart)?;

    let k3d = K3d::new(runner);
    if !k3d.is_installed() {
        return Err(KubeError::K3dNotInstalled);
    }
    if !k3d.cluster_exists(cluster) {
        return Err(KubeError::ClusterNotFound {
            name: cluster.to_string(),
        });
    }

    release_chart(runner, cluster, &chart, request)?;
    Ok(chart)
}

/// Run `helm upgrade --install` for an already parsed chart
///
/// The cluster kubeconfig lives in a temp file for the duration of the call.
pub fn release_chart<R: CommandRunner>(
    runner: &R,
    cluster: &str,
    chart: &ChartRef,
    request: &DeployRequest,
) -> Result<()> {
    let kubeconfig = TempKubeconfig::for_cluster(&K3d::new(runner), cluster)?;
    let release = HelmRelease::new(chart, &request.namespace, kubeconfig.path())
        .with_repo(request.repo.as_deref())
        .with_values_file(request.values_file.as_deref())
        .with_version(request.version.as_deref());

    Helm::new(runner).upgrade_install(&release)
}
