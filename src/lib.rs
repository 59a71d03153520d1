//! CADE deployment configuration resolver
//!
//! Resolves the Crypto Anomaly Detection Engine's runtime configuration from
//! layered sources into one immutable, validated snapshot, and describes the
//! Kubernetes topology the services are deployed with.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): keys, values, topology model, errors, ports
//! - **Service Layer** (`services`): schema registry, loading and
//!   interpolation, validation, the resolver state machine
//! - **Infrastructure Layer** (`infrastructure`): configuration sources,
//!   topology loading and manifests, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use cade_config::infrastructure::sources::EnvSource;
//! use cade_config::services::catalog::cade_schema;
//! use cade_config::ConfigResolver;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigResolver::new(cade_schema())
//!         .with_source(EnvSource::new())
//!         .resolve()?;
//!     let port: u16 = config.require("API_PORT")?;
//!     println!("listening on {port}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{ConfigKey, ConfigValue, DeploymentTopology, KeyType, ResolutionState};
pub use domain::ports::ConfigSource;
pub use domain::{ConfigError, ConfigResult, TopologyError};
pub use services::{ConfigResolver, ResolvedConfig, SchemaRegistry};
