//! Deployment topology infrastructure
//!
//! - Layered loading with figment (defaults, YAML file, `CADE_TOPOLOGY__*`)
//! - Kubernetes manifest rendering

pub mod loader;
pub mod manifest;

pub use loader::TopologyLoader;
pub use manifest::{render_config_map, render_manifests};
