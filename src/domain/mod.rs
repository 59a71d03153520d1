//! Domain layer for the CADE configuration resolver
//!
//! This module contains the configuration data model, the deployment topology
//! model, errors, and the port traits implemented by infrastructure.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ConfigError, ConfigResult, TopologyError, TopologyIssue};
