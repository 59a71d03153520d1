//! `cade-config schema`

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::services::catalog::try_cade_schema;
use crate::services::SchemaRegistry;

use super::list_table;

#[derive(Debug, Serialize)]
pub struct KeyRow {
    pub name: String,
    pub group: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub required: bool,
    pub secret: bool,
    pub default: Option<String>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SchemaOutput {
    pub keys: Vec<KeyRow>,
}

impl From<&SchemaRegistry> for SchemaOutput {
    fn from(schema: &SchemaRegistry) -> Self {
        let keys = schema
            .keys()
            .map(|key| KeyRow {
                name: key.name.clone(),
                group: key.group.clone(),
                key_type: key.key_type.to_string(),
                required: key.required,
                secret: key.is_sensitive(),
                default: key.default.clone(),
                description: key.description.clone(),
            })
            .collect();
        Self { keys }
    }
}

impl CommandOutput for SchemaOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["key", "group", "type", "required", "secret", "default"]);
        for row in &self.keys {
            table.add_row(vec![
                row.name.clone(),
                row.group.clone(),
                row.key_type.clone(),
                if row.required { "yes" } else { "" }.to_string(),
                if row.secret { "yes" } else { "" }.to_string(),
                row.default.clone().unwrap_or_default(),
            ]);
        }
        format!("{} keys:\n{table}", self.keys.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json_mode: bool) -> Result<()> {
    let schema = try_cade_schema().context("CADE schema is inconsistent")?;
    output(&SchemaOutput::from(&schema), json_mode);
    Ok(())
}
