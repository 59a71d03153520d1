//! `cade-config template`

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::services::catalog::try_cade_schema;
use crate::services::render_env_template;

pub fn execute(output: Option<&Path>) -> Result<()> {
    let schema = try_cade_schema().context("CADE schema is inconsistent")?;
    let rendered = render_env_template(&schema);

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} keys to {}",
                style("✓").green(),
                schema.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
