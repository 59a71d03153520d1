pub mod catalog;
pub mod env_template;
pub mod interpolation;
pub mod resolved_config;
pub mod resolver;
pub mod schema_registry;
pub mod source_loader;
pub mod topology_validator;
pub mod validator;

pub use env_template::render_env_template;
pub use resolved_config::ResolvedConfig;
pub use resolver::ConfigResolver;
pub use schema_registry::SchemaRegistry;
pub use source_loader::SourceLoader;
pub use topology_validator::validate_topology;
pub use validator::Validator;
