//! Deployer Kube - local Kubernetes cluster lifecycle
//!
//! This crate provides:
//! - **k3d**: cluster detection, creation and deletion through the `k3d` CLI
//! - **Kubeconfig**: export to a fixed path, or a temp file per operation
//! - **Helm**: idempotent `helm upgrade --install` of a chart into a cluster
//! - **Ingress**: ingress-nginx on the load balancer NodePorts
//! - **Pods**: pod status summaries decoded from `kubectl` JSON output

pub mod cluster;
pub mod error;
pub mod helm;
pub mod ingress;
pub mod k3d;
pub mod kubeconfig;
pub mod pods;

pub use cluster::{ClusterOutcome, DestroyOutcome};
pub use error::{KubeError, Result};
pub use helm::{DeployRequest, Helm, HelmRelease, deploy_chart};
pub use k3d::K3d;
pub use kubeconfig::TempKubeconfig;
pub use pods::{PodSummary, list_pods};
