//! Prerequisite tool installers
//!
//! Each tool is probed first and only installed when the probe fails, so
//! running setup twice installs nothing the second time. Install scripts are
//! fixed per tool (and per distro for Docker).

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::error::{CoreError, Result};
use crate::exec::{CommandRunner, Invocation};
use crate::platform::{Distro, Platform};

const DOCKER_AMAZON_SCRIPT: &str = r#"
if grep -q '2023' /etc/os-release; then
  yum install -y docker
else
  amazon-linux-extras install -y docker
fi
groupadd docker || true
usermod -aG docker "${SUDO_USER:-$(whoami)}"
service docker start
systemctl enable docker || true
"#;

const DOCKER_APT_SCRIPT: &str = r#"
apt-get update
apt-get install -y docker.io
groupadd docker || true
usermod -aG docker "${SUDO_USER:-$(whoami)}"
systemctl enable docker
systemctl start docker
"#;

const HELM_SCRIPT: &str =
    "curl -fsSL https://raw.githubusercontent.com/helm/helm/main/scripts/get-helm-3 | bash";

const K9S_SCRIPT: &str = "curl -sS https://webinstall.dev/k9s | bash";

const KUBECTL_SCRIPT: &str = r#"
curl -LO "https://dl.k8s.io/release/$(curl -L -s https://dl.k8s.io/release/stable.txt)/bin/linux/amd64/kubectl"
chmod +x kubectl
mv kubectl /usr/local/bin/kubectl
"#;

/// A prerequisite installed by `setup`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Docker,
    Helm,
    K9s,
    Kubectl,
}

impl Tool {
    /// Installation order
    pub const ALL: [Tool; 4] = [Tool::Docker, Tool::Helm, Tool::K9s, Tool::Kubectl];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Docker => "Docker",
            Tool::Helm => "Helm",
            Tool::K9s => "K9s",
            Tool::Kubectl => "kubectl",
        }
    }

    /// Command whose success means the tool is installed
    pub fn probe(&self) -> Invocation {
        match self {
            Tool::Docker => Invocation::new("docker").arg("--version"),
            Tool::Helm => Invocation::new("helm").arg("version"),
            Tool::K9s => Invocation::new("k9s").arg("version"),
            Tool::Kubectl => Invocation::new("kubectl").args(["version", "--client=true"]),
        }
    }

    /// Shell script that installs the tool; Docker needs the distro
    pub fn install_script(&self, distro: Option<&Distro>) -> Result<&'static str> {
        match self {
            Tool::Docker => match distro {
                Some(Distro::Amazon) => Ok(DOCKER_AMAZON_SCRIPT),
                Some(Distro::Ubuntu | Distro::Debian) => Ok(DOCKER_APT_SCRIPT),
                other => Err(CoreError::UnsupportedDistro {
                    id: other.map(Distro::to_string).unwrap_or_default(),
                    tool: self.name().to_string(),
                }),
            },
            Tool::Helm => Ok(HELM_SCRIPT),
            Tool::K9s => Ok(K9S_SCRIPT),
            Tool::Kubectl => Ok(KUBECTL_SCRIPT),
        }
    }

    fn needs_distro(&self) -> bool {
        matches!(self, Tool::Docker)
    }

    pub fn is_installed<R: CommandRunner>(&self, runner: &R) -> bool {
        runner.succeeds(&self.probe())
    }

    /// Install unless already present
    pub fn ensure<R: CommandRunner>(&self, runner: &R, os_release: &Path) -> Result<ToolOutcome> {
        if self.is_installed(runner) {
            info!("{} is already installed. Skipping.", self.name());
            return Ok(ToolOutcome::AlreadyInstalled);
        }

        let distro = if self.needs_distro() {
            let distro = Distro::detect(os_release)?;
            info!("Detected Linux distribution: {}", distro);
            Some(distro)
        } else {
            None
        };

        let script = self.install_script(distro.as_ref())?;
        info!("Installing {}...", self.name());
        runner
            .run(&Invocation::shell(script))
            .map_err(|e| CoreError::InstallFailed {
                tool: self.name().to_string(),
                source: Box::new(e),
            })?;
        info!("{} installed successfully.", self.name());

        Ok(ToolOutcome::Installed)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What `ensure` did for a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    AlreadyInstalled,
    Installed,
}

/// Install every prerequisite in order, stopping at the first failure
pub fn install_all<R: CommandRunner>(
    runner: &R,
    platform: &Platform,
    os_release: &Path,
) -> Result<Vec<(Tool, ToolOutcome)>> {
    platform.ensure_supported()?;

    Tool::ALL
        .iter()
        .map(|tool| tool.ensure(runner, os_release).map(|outcome| (*tool, outcome)))
        .collect()
}
