//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed ({status})")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unsupported platform {os}/{arch}: only linux/x86_64 is supported")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("Unsupported distro: {id}. Please install {tool} manually")]
    UnsupportedDistro { id: String, tool: String },

    #[error("Failed to detect Linux distribution from {path}: {message}")]
    DistroDetection { path: PathBuf, message: String },

    #[error("Invalid chart URI '{uri}': {reason}")]
    InvalidChartUri { uri: String, reason: String },

    #[error("Failed to install {tool}: {source}")]
    InstallFailed {
        tool: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse configuration: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Stderr captured from a failed command, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            CoreError::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.trim())
            }
            CoreError::InstallFailed { source, .. } => source.stderr(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
