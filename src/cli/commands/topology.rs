//! `cade-config topology ...`

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::{SourceArgs, TopologyCommands, TopologyInput};
use crate::domain::models::DeploymentTopology;
use crate::infrastructure::logging::SecretScrubber;
use crate::infrastructure::topology::{render_config_map, render_manifests, TopologyLoader};

use super::{list_table, resolve_config};

#[derive(Debug, Serialize)]
pub struct ServiceRow {
    pub name: String,
    pub kind: String,
    pub image: String,
    pub replicas: u32,
    pub port: u32,
    pub autoscaling: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopologyOutput {
    pub namespace: String,
    pub services: Vec<ServiceRow>,
}

impl From<&DeploymentTopology> for TopologyOutput {
    fn from(topology: &DeploymentTopology) -> Self {
        let services = topology
            .services
            .iter()
            .map(|(name, service)| ServiceRow {
                name: name.clone(),
                kind: service.kind.as_str().to_string(),
                image: service.image.clone(),
                replicas: service.replicas,
                port: service.port,
                autoscaling: service.autoscaling.as_ref().map(|a| {
                    format!(
                        "{}-{} @ {}% cpu",
                        a.min_replicas, a.max_replicas, a.target_cpu_utilization
                    )
                }),
            })
            .collect();
        Self {
            namespace: topology.namespace.clone(),
            services,
        }
    }
}

impl CommandOutput for TopologyOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["service", "kind", "image", "replicas", "port", "autoscaling"]);
        for row in &self.services {
            table.add_row(vec![
                row.name.clone(),
                row.kind.clone(),
                row.image.clone(),
                row.replicas.to_string(),
                row.port.to_string(),
                row.autoscaling.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        format!(
            "{} Topology valid (namespace {})\n{table}",
            style("✓").green(),
            style(&self.namespace).bold()
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn load(input: &TopologyInput) -> Result<DeploymentTopology> {
    let topology = match (&input.file, input.file_only) {
        (Some(path), true) => TopologyLoader::load_from_file(path),
        (path, _) => TopologyLoader::load(path.as_deref()),
    };
    topology.context("invalid deployment topology")
}

pub fn execute(
    command: TopologyCommands,
    sources: &SourceArgs,
    scrubber: &SecretScrubber,
    json_mode: bool,
) -> Result<()> {
    match command {
        TopologyCommands::Validate { input } => {
            let topology = load(&input)?;
            output(&TopologyOutput::from(&topology), json_mode);
        }
        TopologyCommands::Render {
            input,
            with_config_map,
        } => {
            let topology = load(&input)?;
            let mut rendered =
                render_manifests(&topology).context("failed to render manifests")?;
            if with_config_map {
                let config = resolve_config(sources, scrubber)?;
                rendered.push_str(
                    &render_config_map(&config, &topology.namespace)
                        .context("failed to render ConfigMap")?,
                );
            }
            print!("{rendered}");
        }
    }
    Ok(())
}
