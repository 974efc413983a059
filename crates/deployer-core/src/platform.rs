//! Host platform and Linux distribution detection

use std::fmt;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Default location of the system identification file
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Operating system and CPU architecture of the running binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// The installers only know how to fetch linux/amd64 artifacts
    pub fn is_supported(&self) -> bool {
        self.os == "linux" && self.arch == "x86_64"
    }

    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(CoreError::UnsupportedPlatform {
                os: self.os.clone(),
                arch: self.arch.clone(),
            })
        }
    }
}

/// Linux distribution, from the `ID` field of os-release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distro {
    Amazon,
    Ubuntu,
    Debian,
    Other(String),
}

impl Distro {
    pub fn from_id(id: &str) -> Self {
        match id {
            "amzn" => Distro::Amazon,
            "ubuntu" => Distro::Ubuntu,
            "debian" => Distro::Debian,
            other => Distro::Other(other.to_string()),
        }
    }

    /// Read and parse an os-release file
    pub fn detect(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::DistroDetection {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::parse(&content).ok_or_else(|| CoreError::DistroDetection {
            path: path.to_path_buf(),
            message: "no ID field".to_string(),
        })
    }

    /// Extract the `ID=` value from os-release content
    pub fn parse(content: &str) -> Option<Self> {
        content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("ID="))
            .map(|value| value.trim().trim_matches(|c| c == '"' || c == '\''))
            .find(|value| !value.is_empty())
            .map(Self::from_id)
    }

    pub fn id(&self) -> &str {
        match self {
            Distro::Amazon => "amzn",
            Distro::Ubuntu => "ubuntu",
            Distro::Debian => "debian",
            Distro::Other(id) => id,
        }
    }
}

impl fmt::Display for Distro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Whether the process runs with an effective uid of 0
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail
    unsafe { libc::geteuid() == 0 }
}
