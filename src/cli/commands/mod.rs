//! CLI command implementations.

pub mod check;
pub mod schema;
pub mod show;
pub mod template;
pub mod topology;

use anyhow::{Context, Result};
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::cli::types::SourceArgs;
use crate::infrastructure::logging::SecretScrubber;
use crate::infrastructure::sources::{EnvFileSource, EnvSource, SecretDirSource};
use crate::services::catalog::try_cade_schema;
use crate::services::{ConfigResolver, ResolvedConfig};

/// Build a resolver over the CADE schema for the configured sources.
pub fn build_resolver(args: &SourceArgs) -> Result<ConfigResolver> {
    let schema = try_cade_schema().context("CADE schema is inconsistent")?;
    let mut resolver = ConfigResolver::new(schema);

    if let Some(path) = &args.env_file {
        resolver.add_source(Box::new(EnvFileSource::new(path)));
    }
    let env = match &args.env_prefix {
        Some(prefix) => EnvSource::new().with_prefix(prefix),
        None => EnvSource::new(),
    };
    resolver.add_source(Box::new(env));
    if let Some(path) = &args.secrets_file {
        resolver.add_source(Box::new(EnvFileSource::secrets(path)));
    }
    if let Some(dir) = &args.secrets_dir {
        resolver.add_source(Box::new(SecretDirSource::new(dir)));
    }

    Ok(resolver)
}

/// Resolve the configuration and register its secrets with the log scrubber.
pub fn resolve_config(args: &SourceArgs, scrubber: &SecretScrubber) -> Result<ResolvedConfig> {
    let config = build_resolver(args)?.resolve()?;
    scrubber.register(config.secret_values());
    Ok(config)
}

/// Borderless table with upper-cased headers.
pub(crate) fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}
