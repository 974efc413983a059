//! Pod status through `kubectl get pods -o json`

use chrono::{DateTime, Utc};
use deployer_core::{CommandRunner, Invocation};
use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};

use crate::error::{KubeError, Result};
use crate::k3d::K3d;
use crate::kubeconfig::TempKubeconfig;

/// `kubectl get -o json` wraps items in a `List`, not a typed `PodList`
#[derive(Debug, Deserialize)]
struct PodItems {
    #[serde(default)]
    items: Vec<Pod>,
}

/// One line of pod status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    /// Phase, or the waiting/terminated reason of the first unhappy container
    pub status: String,
    pub ready: usize,
    pub total: usize,
    pub restarts: i32,
    pub age: Option<String>,
}

impl PodSummary {
    pub fn from_pod(pod: &Pod, now: DateTime<Utc>) -> Self {
        let metadata = &pod.metadata;
        let statuses = pod
            .status
            .as_ref()
            .and_then(|s| s.container_statuses.as_deref())
            .unwrap_or_default();

        let total = pod
            .spec
            .as_ref()
            .map(|s| s.containers.len())
            .unwrap_or(statuses.len());

        Self {
            name: metadata.name.clone().unwrap_or_default(),
            namespace: metadata.namespace.clone().unwrap_or_default(),
            status: pod_status(pod),
            ready: statuses.iter().filter(|c| c.ready).count(),
            total,
            restarts: statuses.iter().map(|c| c.restart_count).sum(),
            age: metadata
                .creation_timestamp
                .as_ref()
                .map(|t| format_age(now.signed_duration_since(t.0))),
        }
    }

    /// `ready/total`, as kubectl prints it
    pub fn ready_display(&self) -> String {
        format!("{}/{}", self.ready, self.total)
    }

    pub fn is_healthy(&self) -> bool {
        match self.status.as_str() {
            "Succeeded" | "Completed" => true,
            "Running" => self.ready == self.total,
            _ => false,
        }
    }
}

fn pod_status(pod: &Pod) -> String {
    if pod.metadata.deletion_timestamp.is_some() {
        return "Terminating".to_string();
    }

    let status = pod.status.as_ref();
    let reason = status
        .and_then(|s| s.container_statuses.as_ref())
        .into_iter()
        .flatten()
        .filter_map(|c| c.state.as_ref())
        .find_map(|state| {
            state
                .waiting
                .as_ref()
                .and_then(|w| w.reason.clone())
                .or_else(|| state.terminated.as_ref().and_then(|t| t.reason.clone()))
        });

    reason
        .or_else(|| status.and_then(|s| s.reason.clone()))
        .or_else(|| status.and_then(|s| s.phase.clone()))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Compact age: `45s`, `12m`, `5h`, `3d`
pub fn format_age(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 60 * 60 => format!("{}m", s / 60),
        s if s < 48 * 60 * 60 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

/// Decode `kubectl get pods -o json` output
pub fn parse_pod_list(json: &str, now: DateTime<Utc>) -> Result<Vec<PodSummary>> {
    let list: PodItems = serde_json::from_str(json)?;
    Ok(list
        .items
        .iter()
        .map(|pod| PodSummary::from_pod(pod, now))
        .collect())
}

/// Pods in `namespace` (all namespaces if `None`) of `cluster`
pub fn list_pods<R: CommandRunner>(
    runner: &R,
    cluster: &str,
    namespace: Option<&str>,
) -> Result<Vec<PodSummary>> {
    let k3d = K3d::new(runner);
    if !k3d.is_installed() {
        return Err(KubeError::K3dNotInstalled);
    }
    if !k3d.cluster_exists(cluster) {
        return Err(KubeError::ClusterNotFound {
            name: cluster.to_string(),
        });
    }

    let kubeconfig = TempKubeconfig::for_cluster(&k3d, cluster)?;

    let mut invocation = Invocation::new("kubectl").args(["get", "pods"]);
    invocation = match namespace {
        Some(ns) => invocation.args(["-n", ns]),
        None => invocation.arg("--all-namespaces"),
    };
    let invocation = invocation
        .args(["-o", "json", "--kubeconfig"])
        .arg(kubeconfig.path().display().to_string());

    let output = runner.output(&invocation)?;
    parse_pod_list(&output.stdout, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deployer_core::MockRunner;

    const NOW: &str = "2025-06-01T12:00:00Z";

    const PODS: &str = r#"{
  "apiVersion": "v1",
  "kind": "List",
  "metadata": { "resourceVersion": "" },
  "items": [
    {
      "apiVersion": "v1",
      "kind": "Pod",
      "metadata": {
        "name": "web-7d4b9c-x2k",
        "namespace": "default",
        "creationTimestamp": "2025-06-01T11:30:00Z"
      },
      "spec": { "containers": [ { "name": "web" }, { "name": "sidecar" } ] },
      "status": {
        "phase": "Running",
        "containerStatuses": [
          { "name": "web", "image": "nginx", "imageID": "", "ready": true, "restartCount": 0 },
          { "name": "sidecar", "image": "envoy", "imageID": "", "ready": true, "restartCount": 2 }
        ]
      }
    },
    {
      "apiVersion": "v1",
      "kind": "Pod",
      "metadata": {
        "name": "worker-5f6d-abc",
        "namespace": "default",
        "creationTimestamp": "2025-05-29T12:00:00Z"
      },
      "spec": { "containers": [ { "name": "worker" } ] },
      "status": {
        "phase": "Running",
        "containerStatuses": [
          {
            "name": "worker", "image": "busybox", "imageID": "", "ready": false, "restartCount": 7,
            "state": { "waiting": { "reason": "CrashLoopBackOff" } }
          }
        ]
      }
    },
    {
      "apiVersion": "v1",
      "kind": "Pod",
      "metadata": { "name": "pending-1", "namespace": "default" },
      "spec": { "containers": [ { "name": "app" } ] },
      "status": { "phase": "Pending" }
    }
  ]
}"#;

    fn now() -> DateTime<Utc> {
        NOW.parse().unwrap()
    }

    #[test]
    fn test_parse_pod_list() {
        let pods = parse_pod_list(PODS, now()).unwrap();
        assert_eq!(pods.len(), 3);

        let web = &pods[0];
        assert_eq!(web.name, "web-7d4b9c-x2k");
        assert_eq!(web.status, "Running");
        assert_eq!(web.ready_display(), "2/2");
        assert_eq!(web.restarts, 2);
        assert_eq!(web.age.as_deref(), Some("30m"));
        assert!(web.is_healthy());

        let worker = &pods[1];
        assert_eq!(worker.status, "CrashLoopBackOff");
        assert_eq!(worker.ready_display(), "0/1");
        assert_eq!(worker.restarts, 7);
        assert_eq!(worker.age.as_deref(), Some("3d"));
        assert!(!worker.is_healthy());

        let pending = &pods[2];
        assert_eq!(pending.status, "Pending");
        assert_eq!(pending.ready_display(), "0/1");
        assert_eq!(pending.age, None);
    }

    #[test]
    fn test_empty_list() {
        let json = r#"{"apiVersion":"v1","items":[],"kind":"List","metadata":{"resourceVersion":""}}"#;
        assert!(parse_pod_list(json, now()).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_output() {
        let err = parse_pod_list("No resources found", now()).unwrap_err();
        assert!(matches!(err, KubeError::PodList(_)));
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(chrono::Duration::seconds(-5)), "0s");
        assert_eq!(format_age(chrono::Duration::seconds(59)), "59s");
        assert_eq!(format_age(chrono::Duration::minutes(59)), "59m");
        assert_eq!(format_age(chrono::Duration::hours(47)), "47h");
        assert_eq!(format_age(chrono::Duration::hours(48)), "2d");
    }

    #[test]
    fn test_list_pods_invocation() {
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\nlocal 1/1\n")
            .respond("k3d kubeconfig get", "apiVersion: v1\n")
            .respond("kubectl get pods", PODS);

        let pods = list_pods(&runner, "local", Some("default")).unwrap();
        assert_eq!(pods.len(), 3);

        let kubectl = runner.calls().into_iter().last().unwrap();
        let args = kubectl.arguments();
        assert_eq!(&args[..6], ["get", "pods", "-n", "default", "-o", "json"]);
        assert_eq!(args[6], "--kubeconfig");
    }

    #[test]
    fn test_list_pods_all_namespaces() {
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\nlocal 1/1\n")
            .respond("k3d kubeconfig get", "apiVersion: v1\n")
            .respond("kubectl get pods", r#"{"items":[]}"#);

        list_pods(&runner, "local", None).unwrap();
        assert!(runner.ran("kubectl get pods --all-namespaces -o json"));
    }

    #[test]
    fn test_list_pods_requires_cluster() {
        let runner = MockRunner::new()
            .with_program("k3d")
            .respond("k3d cluster list", "NAME\n");
        let err = list_pods(&runner, "local", None).unwrap_err();
        assert!(matches!(err, KubeError::ClusterNotFound { .. }));
        assert!(!runner.ran("kubectl"));

        let runner = MockRunner::new();
        let err = list_pods(&runner, "local", None).unwrap_err();
        assert!(matches!(err, KubeError::K3dNotInstalled));
    }
}
