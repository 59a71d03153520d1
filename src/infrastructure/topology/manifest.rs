//! Kubernetes manifest rendering for a [`DeploymentTopology`].

use serde_json::{json, Value};

use crate::domain::models::{DeploymentTopology, ServiceDefinition, WorkloadKind};
use crate::services::ResolvedConfig;

/// Name of the ConfigMap holding non-sensitive configuration.
pub const CONFIG_MAP_NAME: &str = "cade-config";
/// Name of the Secret every workload reads credentials from.
pub const SECRET_NAME: &str = "cade-secrets";

fn resource_name(service: &str) -> String {
    format!("cade-{service}")
}

fn labels(service: &str) -> Value {
    json!({
        "app.kubernetes.io/name": resource_name(service),
        "app.kubernetes.io/part-of": "cade",
    })
}

fn probe(path: &str, port: u32, initial_delay: u32, period: u32) -> Value {
    json!({
        "httpGet": { "path": path, "port": port },
        "initialDelaySeconds": initial_delay,
        "periodSeconds": period,
    })
}

fn container(name: &str, service: &ServiceDefinition) -> Value {
    let mut container = json!({
        "name": name,
        "image": service.image,
        "ports": [{ "containerPort": service.port }],
        "envFrom": [
            { "configMapRef": { "name": CONFIG_MAP_NAME } },
            { "secretRef": { "name": SECRET_NAME } },
        ],
        "resources": {
            "requests": {
                "cpu": service.resources.requests.cpu,
                "memory": service.resources.requests.memory,
            },
            "limits": {
                "cpu": service.resources.limits.cpu,
                "memory": service.resources.limits.memory,
            },
        },
    });

    if !service.args.is_empty() {
        container["args"] = json!(service.args);
    }
    if let Some(health) = &service.health {
        container["livenessProbe"] = probe(
            &health.liveness_path,
            service.port,
            health.initial_delay_seconds,
            health.period_seconds,
        );
        container["readinessProbe"] = probe(
            &health.readiness_path,
            service.port,
            health.initial_delay_seconds / 2,
            health.period_seconds,
        );
    }
    if service.storage.is_some() {
        container["volumeMounts"] = json!([{ "name": "data", "mountPath": service.data_path }]);
    }
    container
}

/// The Deployment or StatefulSet for one service.
pub fn workload(namespace: &str, name: &str, service: &ServiceDefinition) -> Value {
    let full_name = resource_name(name);
    let mut spec = json!({
        "replicas": service.replicas,
        "selector": { "matchLabels": labels(name) },
        "template": {
            "metadata": { "labels": labels(name) },
            "spec": { "containers": [container(name, service)] },
        },
    });

    if service.kind == WorkloadKind::StatefulSet {
        spec["serviceName"] = json!(full_name);
        if let Some(size) = &service.storage {
            spec["volumeClaimTemplates"] = json!([{
                "metadata": { "name": "data" },
                "spec": {
                    "accessModes": ["ReadWriteOnce"],
                    "resources": { "requests": { "storage": size } },
                },
            }]);
        }
    }

    json!({
        "apiVersion": "apps/v1",
        "kind": service.kind.as_str(),
        "metadata": { "name": full_name, "namespace": namespace, "labels": labels(name) },
        "spec": spec,
    })
}

/// The Service fronting one workload; headless for StatefulSets.
pub fn service(namespace: &str, name: &str, definition: &ServiceDefinition) -> Value {
    let mut spec = json!({
        "selector": labels(name),
        "ports": [{ "name": "main", "port": definition.port, "targetPort": definition.port }],
    });
    if definition.kind == WorkloadKind::StatefulSet {
        spec["clusterIP"] = json!("None");
    }

    json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": { "name": resource_name(name), "namespace": namespace, "labels": labels(name) },
        "spec": spec,
    })
}

/// The `autoscaling/v2` HorizontalPodAutoscaler, if the service scales.
pub fn autoscaler(namespace: &str, name: &str, definition: &ServiceDefinition) -> Option<Value> {
    let scaling = definition.autoscaling.as_ref()?;
    Some(json!({
        "apiVersion": "autoscaling/v2",
        "kind": "HorizontalPodAutoscaler",
        "metadata": { "name": resource_name(name), "namespace": namespace, "labels": labels(name) },
        "spec": {
            "scaleTargetRef": {
                "apiVersion": "apps/v1",
                "kind": definition.kind.as_str(),
                "name": resource_name(name),
            },
            "minReplicas": scaling.min_replicas,
            "maxReplicas": scaling.max_replicas,
            "metrics": [{
                "type": "Resource",
                "resource": {
                    "name": "cpu",
                    "target": { "type": "Utilization", "averageUtilization": scaling.target_cpu_utilization },
                },
            }],
        },
    }))
}

/// Every manifest for the topology, in service-name order.
pub fn manifests(topology: &DeploymentTopology) -> Vec<Value> {
    let mut documents = Vec::new();
    for (name, definition) in &topology.services {
        documents.push(workload(&topology.namespace, name, definition));
        documents.push(service(&topology.namespace, name, definition));
        documents.extend(autoscaler(&topology.namespace, name, definition));
    }
    documents
}

/// ConfigMap with every non-sensitive resolved value.
pub fn config_map(namespace: &str, config: &ResolvedConfig) -> Value {
    let data: serde_json::Map<String, Value> = config
        .iter()
        .filter(|(name, _)| !config.schema().is_sensitive(name))
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect();

    json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": { "name": CONFIG_MAP_NAME, "namespace": namespace, "labels": { "app.kubernetes.io/part-of": "cade" } },
        "data": data,
    })
}

/// Serialize documents as a multi-document YAML stream.
pub fn to_yaml_stream(documents: &[Value]) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for document in documents {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(document)?);
    }
    Ok(out)
}

/// Render every workload, Service and autoscaler as one YAML stream.
pub fn render_manifests(topology: &DeploymentTopology) -> Result<String, serde_yaml::Error> {
    to_yaml_stream(&manifests(topology))
}

/// Render the `cade-config` ConfigMap for a resolved configuration.
pub fn render_config_map(
    config: &ResolvedConfig,
    namespace: &str,
) -> Result<String, serde_yaml::Error> {
    to_yaml_stream(&[config_map(namespace, config)])
}
