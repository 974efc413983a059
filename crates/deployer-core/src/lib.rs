//! Deployer Core - building blocks for the local cluster orchestrator
//!
//! This crate provides the pieces every deployer flow is made of:
//! - `CommandRunner`: the seam through which every external process runs
//! - `Platform` / `Distro`: host detection for the tool installers
//! - `tools`: idempotent installers for Docker, Helm, k9s and kubectl
//! - `ChartRef`: chart URI parsing into a Helm release name
//! - `HostsFile`: hosts file patching
//! - `DeployerConfig`: optional configuration file with built-in defaults

pub mod chart;
pub mod config;
pub mod error;
pub mod exec;
pub mod hosts;
pub mod platform;
pub mod tools;

pub use chart::ChartRef;
pub use config::{ClusterSettings, DeployerConfig, HostsSettings, IngressSettings};
pub use error::{CoreError, Result};
pub use exec::{CommandOutput, CommandRunner, Invocation, MockRunner, SystemRunner};
pub use hosts::{HostsFile, HostsPatch};
pub use platform::{Distro, Platform, is_root};
pub use tools::{Tool, ToolOutcome, install_all};
