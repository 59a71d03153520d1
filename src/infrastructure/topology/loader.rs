use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::errors::TopologyError;
use crate::domain::models::DeploymentTopology;
use crate::services::topology_validator::validate_topology;

/// Prefix of environment variables overriding topology fields,
/// e.g. `CADE_TOPOLOGY__SERVICES__API__REPLICAS=5`.
pub const ENV_PREFIX: &str = "CADE_TOPOLOGY__";

/// Topology loader with hierarchical merging
pub struct TopologyLoader;

impl TopologyLoader {
    /// Load a topology on top of the CADE defaults
    ///
    /// Precedence (lowest to highest):
    /// 1. `DeploymentTopology::cade_default()`
    /// 2. The YAML file, when given
    /// 3. `CADE_TOPOLOGY__*` environment variables
    pub fn load(path: Option<&Path>) -> Result<DeploymentTopology, TopologyError> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(DeploymentTopology::cade_default()));
        if let Some(path) = path {
            ensure_exists(path)?;
            figment = figment.merge(Yaml::file(path));
        }

        Self::finish(figment)
    }

    /// Load a topology from the YAML file alone (plus environment overrides);
    /// services not listed in the file are not deployed.
    pub fn load_from_file(path: &Path) -> Result<DeploymentTopology, TopologyError> {
        ensure_exists(path)?;
        Self::finish(Figment::new().merge(Yaml::file(path)))
    }

    fn finish(figment: Figment) -> Result<DeploymentTopology, TopologyError> {
        let topology: DeploymentTopology = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        validate_topology(&topology)?;
        tracing::debug!(
            namespace = %topology.namespace,
            services = topology.services.len(),
            "topology loaded"
        );
        Ok(topology)
    }
}

fn ensure_exists(path: &Path) -> Result<(), TopologyError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(TopologyError::Load(format!(
            "topology file not found: {}",
            path.display()
        )))
    }
}
