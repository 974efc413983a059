//! Kubeconfig export

use std::path::Path;

use deployer_core::CommandRunner;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;
use crate::k3d::K3d;

/// Write the kubeconfig of `cluster` to `path`, replacing any previous file
pub fn export<R: CommandRunner>(k3d: &K3d<R>, cluster: &str, path: &Path) -> Result<()> {
    let content = k3d.kubeconfig(cluster)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    info!("Wrote kubeconfig to {}", path.display());
    Ok(())
}

/// Kubeconfig in a private temp file, removed on drop
#[derive(Debug)]
pub struct TempKubeconfig {
    file: NamedTempFile,
}

impl TempKubeconfig {
    pub fn for_cluster<R: CommandRunner>(k3d: &K3d<R>, cluster: &str) -> Result<Self> {
        let content = k3d.kubeconfig(cluster)?;
        Self::from_content(&content)
    }

    pub fn from_content(content: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("kubeconfig-")
            .suffix(".yaml")
            .tempfile()?;
        std::fs::write(file.path(), content)?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
