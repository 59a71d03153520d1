use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative description of the CADE services running in the cluster.
///
/// Read-only once loaded; consumed by manifest generation and validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DeploymentTopology {
    /// Kubernetes namespace all services are deployed into
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Services keyed by name
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,
}

fn default_namespace() -> String {
    "cade".to_string()
}

/// Kubernetes workload kind used for a service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
        }
    }
}

/// One service in the topology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ServiceDefinition {
    pub kind: WorkloadKind,

    /// Container image reference
    pub image: String,

    #[serde(default = "default_replicas")]
    pub replicas: u32,

    /// Container port the service listens on
    pub port: u32,

    #[serde(default)]
    pub resources: ResourcePolicy,

    /// Liveness/readiness probes; `None` disables HTTP probes (databases)
    #[serde(default)]
    pub health: Option<HealthCheck>,

    #[serde(default)]
    pub autoscaling: Option<AutoscalingPolicy>,

    /// Persistent volume size for stateful workloads (e.g. `10Gi`)
    #[serde(default)]
    pub storage: Option<String>,

    /// Where the persistent volume is mounted
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Container arguments
    #[serde(default)]
    pub args: Vec<String>,
}

const fn default_replicas() -> u32 {
    1
}

fn default_data_path() -> String {
    "/data".to_string()
}

/// CPU and memory quantities in Kubernetes notation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceQuantities {
    pub cpu: String,
    pub memory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourcePolicy {
    pub requests: ResourceQuantities,
    pub limits: ResourceQuantities,
}

impl Default for ResourcePolicy {
    fn default() -> Self {
        Self::new(("250m", "256Mi"), ("500m", "512Mi"))
    }
}

impl ResourcePolicy {
    pub fn new(requests: (&str, &str), limits: (&str, &str)) -> Self {
        Self {
            requests: ResourceQuantities {
                cpu: requests.0.to_string(),
                memory: requests.1.to_string(),
            },
            limits: ResourceQuantities {
                cpu: limits.0.to_string(),
                memory: limits.1.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HealthCheck {
    #[serde(default = "default_liveness_path")]
    pub liveness_path: String,

    #[serde(default = "default_readiness_path")]
    pub readiness_path: String,

    #[serde(default = "default_initial_delay")]
    pub initial_delay_seconds: u32,

    #[serde(default = "default_period")]
    pub period_seconds: u32,
}

fn default_liveness_path() -> String {
    "/health".to_string()
}

fn default_readiness_path() -> String {
    "/ready".to_string()
}

const fn default_initial_delay() -> u32 {
    10
}

const fn default_period() -> u32 {
    15
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            liveness_path: default_liveness_path(),
            readiness_path: default_readiness_path(),
            initial_delay_seconds: default_initial_delay(),
            period_seconds: default_period(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AutoscalingPolicy {
    pub min_replicas: u32,
    pub max_replicas: u32,
    /// Average CPU utilisation percentage that triggers scaling
    pub target_cpu_utilization: u32,
}

impl DeploymentTopology {
    /// The four-service layout CADE is deployed with.
    pub fn cade_default() -> Self {
        let mut services = BTreeMap::new();

        services.insert(
            "api".to_string(),
            ServiceDefinition {
                kind: WorkloadKind::Deployment,
                image: "cadesol/cade-api:1.0.0".to_string(),
                replicas: 3,
                port: 8000,
                resources: ResourcePolicy::new(("500m", "512Mi"), ("1", "1Gi")),
                health: Some(HealthCheck::default()),
                autoscaling: Some(AutoscalingPolicy {
                    min_replicas: 3,
                    max_replicas: 10,
                    target_cpu_utilization: 70,
                }),
                storage: None,
                data_path: default_data_path(),
                args: vec![],
            },
        );

        services.insert(
            "worker".to_string(),
            ServiceDefinition {
                kind: WorkloadKind::Deployment,
                image: "cadesol/cade-worker:1.0.0".to_string(),
                replicas: 2,
                port: 8001,
                resources: ResourcePolicy::new(("1", "1Gi"), ("2", "2Gi")),
                health: Some(HealthCheck {
                    initial_delay_seconds: 20,
                    ..HealthCheck::default()
                }),
                autoscaling: Some(AutoscalingPolicy {
                    min_replicas: 2,
                    max_replicas: 8,
                    target_cpu_utilization: 75,
                }),
                storage: None,
                data_path: default_data_path(),
                args: vec!["worker".to_string()],
            },
        );

        services.insert(
            "postgres".to_string(),
            ServiceDefinition {
                kind: WorkloadKind::StatefulSet,
                image: "postgres:15-alpine".to_string(),
                replicas: 1,
                port: 5432,
                resources: ResourcePolicy::new(("500m", "1Gi"), ("1", "2Gi")),
                health: None,
                autoscaling: None,
                storage: Some("10Gi".to_string()),
                data_path: "/var/lib/postgresql/data".to_string(),
                args: vec![],
            },
        );

        services.insert(
            "redis".to_string(),
            ServiceDefinition {
                kind: WorkloadKind::StatefulSet,
                image: "redis:7-alpine".to_string(),
                replicas: 1,
                port: 6379,
                resources: ResourcePolicy::new(("100m", "256Mi"), ("500m", "512Mi")),
                health: None,
                autoscaling: None,
                storage: Some("1Gi".to_string()),
                data_path: default_data_path(),
                args: vec![],
            },
        );

        Self {
            namespace: default_namespace(),
            services,
        }
    }
}

impl Default for DeploymentTopology {
    fn default() -> Self {
        Self::cade_default()
    }
}

/// Parse a Kubernetes CPU quantity (`500m`, `0.5`, `2`) into millicores.
pub fn parse_cpu_millis(quantity: &str) -> Option<u64> {
    let quantity = quantity.trim();
    if let Some(millis) = quantity.strip_suffix('m') {
        return millis.parse().ok();
    }
    let cores: f64 = quantity.parse().ok()?;
    if !cores.is_finite() || cores < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = (cores * 1000.0).round() as u64;
    Some(millis)
}

/// Parse a Kubernetes memory quantity (`512Mi`, `1Gi`, `1G`, `1048576`) into bytes.
pub fn parse_memory_bytes(quantity: &str) -> Option<u64> {
    const SUFFIXES: [(&str, u64); 8] = [
        ("Ki", 1 << 10),
        ("Mi", 1 << 20),
        ("Gi", 1 << 30),
        ("Ti", 1 << 40),
        ("k", 1_000),
        ("M", 1_000_000),
        ("G", 1_000_000_000),
        ("T", 1_000_000_000_000),
    ];

    let quantity = quantity.trim();
    for (suffix, multiplier) in SUFFIXES {
        if let Some(number) = quantity.strip_suffix(suffix) {
            return number.parse::<u64>().ok()?.checked_mul(multiplier);
        }
    }
    quantity.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu() {
        assert_eq!(parse_cpu_millis("500m"), Some(500));
        assert_eq!(parse_cpu_millis("1"), Some(1000));
        assert_eq!(parse_cpu_millis("0.25"), Some(250));
        assert_eq!(parse_cpu_millis("lots"), None);
        assert_eq!(parse_cpu_millis("-1"), None);
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!(parse_memory_bytes("512Mi"), Some(512 * 1024 * 1024));
        assert_eq!(parse_memory_bytes("1Gi"), Some(1024 * 1024 * 1024));
        assert_eq!(parse_memory_bytes("1G"), Some(1_000_000_000));
        assert_eq!(parse_memory_bytes("2048"), Some(2048));
        assert_eq!(parse_memory_bytes("big"), None);
    }

    #[test]
    fn test_cade_default_layout() {
        let topology = DeploymentTopology::cade_default();
        assert_eq!(topology.namespace, "cade");
        assert_eq!(
            topology.services.keys().collect::<Vec<_>>(),
            vec!["api", "postgres", "redis", "worker"]
        );
        assert_eq!(topology.services["api"].replicas, 3);
        assert_eq!(
            topology.services["postgres"].kind,
            WorkloadKind::StatefulSet
        );
    }

    #[test]
    fn test_yaml_parsing_fills_defaults() {
        let yaml = r"
namespace: staging
services:
  api:
    kind: deployment
    image: cadesol/cade-api:2.0.0
    port: 8000
    health: {}
";
        let topology: DeploymentTopology = serde_yaml::from_str(yaml).expect("YAML should parse");
        let api = &topology.services["api"];
        assert_eq!(topology.namespace, "staging");
        assert_eq!(api.replicas, 1);
        assert_eq!(api.resources, ResourcePolicy::default());
        assert_eq!(api.health.as_ref().unwrap().liveness_path, "/health");
    }
}
