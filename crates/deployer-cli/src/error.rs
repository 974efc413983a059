//! CLI error types with exit code handling
//!
//! Library errors are folded into a single diagnostic type that knows which
//! exit code the process should end with.

use deployer_core::CoreError;
use deployer_kube::KubeError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Invalid input that clap could not catch
    #[error("{message}")]
    #[diagnostic(code(deployer::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Not running as root
    #[error("{message}")]
    #[diagnostic(
        code(deployer::cli::permission),
        help("Run with root privileges, e.g. `sudo deployer ...`")
    )]
    Permission { message: String },

    /// Platform or distribution the installers do not handle
    #[error("{message}")]
    #[diagnostic(code(deployer::cli::unsupported))]
    Unsupported { message: String },

    /// Cluster or k3d missing
    #[error("{message}")]
    #[diagnostic(code(deployer::cli::cluster))]
    ClusterNotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// An external command failed
    #[error("{message}")]
    #[diagnostic(code(deployer::cli::command))]
    CommandFailed {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration file could not be used
    #[error("{message}")]
    #[diagnostic(code(deployer::cli::config))]
    Config { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(deployer::cli::io))]
    Io { message: String },

    /// Internal error (unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(deployer::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Permission { .. } => exit_codes::NO_PERMISSION,
            CliError::Unsupported { .. } => exit_codes::UNAVAILABLE,
            CliError::ClusterNotFound { .. } => exit_codes::CLUSTER_NOT_FOUND,
            CliError::CommandFailed { .. } => exit_codes::ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a usage error with help text
    pub fn usage_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a permission error
    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match &err {
            CoreError::UnsupportedPlatform { .. } | CoreError::UnsupportedDistro { .. } => {
                CliError::Unsupported { message }
            }
            CoreError::InvalidChartUri { .. } => CliError::usage_with_help(
                message,
                "Use an OCI reference (oci://registry/org/chart), repo/chart, or a chart path",
            ),
            CoreError::InvalidConfig { .. } | CoreError::YamlParse(_) => {
                CliError::Config { message }
            }
            CoreError::Io(_) | CoreError::DistroDetection { .. } => CliError::Io { message },
            CoreError::Spawn { program, .. } => CliError::CommandFailed {
                help: Some(format!(
                    "Is `{program}` installed? Run `deployer setup` to install prerequisites"
                )),
                message,
            },
            CoreError::CommandFailed { .. } | CoreError::InstallFailed { .. } => {
                CliError::CommandFailed {
                    help: err.stderr().map(str::to_string),
                    message,
                }
            }
        }
    }
}

impl From<KubeError> for CliError {
    fn from(err: KubeError) -> Self {
        match err {
            KubeError::Core(core) => core.into(),
            KubeError::ClusterNotFound { name } => CliError::ClusterNotFound {
                message: format!("Cluster '{name}' is not running"),
                help: Some(format!("Run `deployer cluster {name}` to create it")),
            },
            KubeError::K3dNotInstalled => CliError::ClusterNotFound {
                message: "k3d is not installed".to_string(),
                help: Some("Run `deployer cluster` to install k3d and create a cluster".to_string()),
            },
            KubeError::Io(e) => CliError::Io {
                message: e.to_string(),
            },
            other => CliError::CommandFailed {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
