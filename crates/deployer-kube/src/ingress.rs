//! ingress-nginx, exposed through the k3d load balancer NodePorts

use deployer_core::{ChartRef, CommandRunner, IngressSettings};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use crate::error::Result;
use crate::helm::{DeployRequest, release_chart};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IngressValues {
    controller: Controller,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Controller {
    publish_service: PublishService,
    service: Service,
}

#[derive(Debug, Serialize)]
struct PublishService {
    enabled: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Service {
    #[serde(rename = "type")]
    service_type: &'static str,
    node_ports: NodePorts,
}

#[derive(Debug, Serialize)]
struct NodePorts {
    http: u16,
    https: u16,
}

/// Helm values for the controller
pub fn values_yaml(settings: &IngressSettings) -> Result<String> {
    let values = IngressValues {
        controller: Controller {
            publish_service: PublishService { enabled: true },
            service: Service {
                service_type: "NodePort",
                node_ports: NodePorts {
                    http: settings.http_node_port,
                    https: settings.https_node_port,
                },
            },
        },
    };
    Ok(serde_yaml::to_string(&values)?)
}

/// Install the controller into a freshly created `cluster`
///
/// The values file only exists for the duration of the Helm call.
pub fn install<R: CommandRunner>(
    runner: &R,
    cluster: &str,
    settings: &IngressSettings,
) -> Result<()> {
    info!("Installing {} via Helm...", settings.chart);
    let chart = ChartRef::parse(&settings.chart)?;

    let mut values = tempfile::Builder::new()
        .prefix("ingress-values-")
        .suffix(".yaml")
        .tempfile()?;
    values.write_all(values_yaml(settings)?.as_bytes())?;
    values.flush()?;

    let request = DeployRequest {
        chart: settings.chart.clone(),
        namespace: settings.namespace.clone(),
        values_file: Some(values.path().to_path_buf()),
        repo: Some(settings.repo.clone()),
        version: None,
    };
    release_chart(runner, cluster, &chart, &request)
}
