pub mod key;
pub mod state;
pub mod topology;
pub mod value;

pub use key::{ConfigKey, KeyType, Sensitivity};
pub use state::ResolutionState;
pub use topology::{
    AutoscalingPolicy, DeploymentTopology, HealthCheck, ResourcePolicy, ResourceQuantities,
    ServiceDefinition, WorkloadKind,
};
pub use value::{ConfigValue, FromConfigValue};
