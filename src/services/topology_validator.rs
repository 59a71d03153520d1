use crate::domain::errors::{TopologyError, TopologyIssue};
use crate::domain::models::topology::{parse_cpu_millis, parse_memory_bytes};
use crate::domain::models::{DeploymentTopology, ServiceDefinition, WorkloadKind};

/// Check a topology, collecting every issue rather than stopping at the first.
pub fn validate_topology(topology: &DeploymentTopology) -> Result<(), TopologyError> {
    let mut issues = Vec::new();

    if topology.namespace.trim().is_empty() {
        issues.push(TopologyIssue {
            service: "<topology>".to_string(),
            reason: "namespace must not be empty".to_string(),
        });
    }
    if topology.services.is_empty() {
        issues.push(TopologyIssue {
            service: "<topology>".to_string(),
            reason: "at least one service is required".to_string(),
        });
    }

    for (name, service) in &topology.services {
        for reason in service_issues(service) {
            issues.push(TopologyIssue {
                service: name.clone(),
                reason,
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(TopologyError::Invalid(issues))
    }
}

fn service_issues(service: &ServiceDefinition) -> Vec<String> {
    let mut issues = Vec::new();

    if service.image.trim().is_empty() {
        issues.push("image must not be empty".to_string());
    }
    if service.replicas == 0 {
        issues.push("replicas must be at least 1".to_string());
    }
    if !(1..=65_535).contains(&service.port) {
        issues.push(format!("port {} is outside 1-65535", service.port));
    }

    let requests = &service.resources.requests;
    let limits = &service.resources.limits;
    match (parse_cpu_millis(&requests.cpu), parse_cpu_millis(&limits.cpu)) {
        (Some(req), Some(lim)) if req > lim => issues.push(format!(
            "cpu request {} exceeds limit {}",
            requests.cpu, limits.cpu
        )),
        (None, _) => issues.push(format!("invalid cpu request '{}'", requests.cpu)),
        (_, None) => issues.push(format!("invalid cpu limit '{}'", limits.cpu)),
        _ => {}
    }
    match (
        parse_memory_bytes(&requests.memory),
        parse_memory_bytes(&limits.memory),
    ) {
        (Some(req), Some(lim)) if req > lim => issues.push(format!(
            "memory request {} exceeds limit {}",
            requests.memory, limits.memory
        )),
        (None, _) => issues.push(format!("invalid memory request '{}'", requests.memory)),
        (_, None) => issues.push(format!("invalid memory limit '{}'", limits.memory)),
        _ => {}
    }

    if let Some(health) = &service.health {
        for (probe, path) in [
            ("liveness", &health.liveness_path),
            ("readiness", &health.readiness_path),
        ] {
            if !path.starts_with('/') {
                issues.push(format!("{probe} path '{path}' must start with '/'"));
            }
        }
        if health.period_seconds == 0 {
            issues.push("health check period must be at least 1 second".to_string());
        }
    }

    if let Some(scaling) = &service.autoscaling {
        if scaling.min_replicas == 0 {
            issues.push("autoscaling min_replicas must be at least 1".to_string());
        }
        if scaling.min_replicas > scaling.max_replicas {
            issues.push(format!(
                "autoscaling min_replicas {} exceeds max_replicas {}",
                scaling.min_replicas, scaling.max_replicas
            ));
        } else if !(scaling.min_replicas..=scaling.max_replicas).contains(&service.replicas) {
            issues.push(format!(
                "replicas {} outside autoscaling range {}-{}",
                service.replicas, scaling.min_replicas, scaling.max_replicas
            ));
        }
        if !(1..=100).contains(&scaling.target_cpu_utilization) {
            issues.push(format!(
                "target_cpu_utilization {} must be within 1-100",
                scaling.target_cpu_utilization
            ));
        }
    }

    match (service.kind, &service.storage) {
        (WorkloadKind::StatefulSet, None) => {
            issues.push("statefulset requires a storage size".to_string());
        }
        (_, Some(size)) if parse_memory_bytes(size).is_none() => {
            issues.push(format!("invalid storage size '{size}'"));
        }
        _ => {}
    }

    issues
}
