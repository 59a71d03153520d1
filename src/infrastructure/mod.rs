//! Infrastructure layer module
//!
//! Adapters around the resolution services:
//! - Configuration sources (environment, env files, mounted secrets)
//! - Deployment topology loading and manifest rendering
//! - Logging infrastructure with secret scrubbing
//!
//! Source implementations satisfy the `ConfigSource` port defined in the
//! domain layer.

pub mod logging;
pub mod sources;
pub mod topology;
