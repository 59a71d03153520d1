//! `cade-config show`

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::SourceArgs;
use crate::infrastructure::logging::SecretScrubber;

use super::{list_table, resolve_config};

#[derive(Debug, Serialize)]
pub struct ShownValue {
    pub key: String,
    pub group: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub values: Vec<ShownValue>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        if self.values.is_empty() {
            return "No values set.".to_string();
        }
        let mut table = list_table(&["key", "group", "value"]);
        for shown in &self.values {
            table.add_row(vec![&shown.key, &shown.group, &shown.value]);
        }
        table.to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .map(|shown| (shown.key.clone(), shown.value.clone().into()))
            .collect();
        serde_json::Value::Object(map)
    }
}

pub fn execute(
    sources: &SourceArgs,
    group: Option<&str>,
    scrubber: &SecretScrubber,
    json_mode: bool,
) -> Result<()> {
    let config = resolve_config(sources, scrubber)?;
    let schema = config.schema();

    if let Some(group) = group {
        if !schema.keys().any(|key| key.group.eq_ignore_ascii_case(group)) {
            bail!("unknown configuration group '{group}'");
        }
    }

    let redacted = config.redacted();
    let values = schema
        .keys()
        .filter(|key| group.is_none_or(|g| key.group.eq_ignore_ascii_case(g)))
        .filter_map(|key| {
            redacted.get(&key.name).map(|value| ShownValue {
                key: key.name.clone(),
                group: key.group.clone(),
                value: value.clone(),
            })
        })
        .collect();

    output(&ShowOutput { values }, json_mode);
    Ok(())
}
