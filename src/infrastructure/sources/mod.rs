//! Configuration source adapters
//!
//! Implementations of the `ConfigSource` port:
//! - Schema defaults
//! - Process environment and dotenv files
//! - Mounted secrets (dotenv file or one-file-per-key directory)

pub mod defaults;
pub mod dotenv;
pub mod env;
pub mod secret_dir;

pub use defaults::DefaultsSource;
pub use env::{EnvFileSource, EnvSource};
pub use secret_dir::SecretDirSource;
