//! `cade-config check`

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SourceArgs;
use crate::infrastructure::logging::SecretScrubber;

use super::resolve_config;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub status: String,
    pub keys_set: usize,
    pub keys_known: usize,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        format!(
            "{} Configuration resolved: {} of {} keys set",
            style("✓").green(),
            self.keys_set,
            self.keys_known
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(sources: &SourceArgs, scrubber: &SecretScrubber, json_mode: bool) -> Result<()> {
    let config = resolve_config(sources, scrubber)?;
    let out = CheckOutput {
        status: "ready".to_string(),
        keys_set: config.len(),
        keys_known: config.schema().len(),
    };
    output(&out, json_mode);
    Ok(())
}
