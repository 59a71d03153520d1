//! Port trait definitions (Hexagonal Architecture)
//!
//! - `ConfigSource`: an origin of raw configuration values
//!
//! Infrastructure adapters (environment, env files, mounted secrets) implement
//! these traits so the resolution services stay independent of where values
//! come from.

pub mod config_source;

pub use config_source::{precedence, ConfigSource};
