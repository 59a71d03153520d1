use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::errors::ConfigResult;
use crate::domain::ports::ConfigSource;
use crate::domain::models::KeyType;
use crate::services::interpolation::{interpolate_with, references, ValueMode};
use crate::services::SchemaRegistry;

/// Merges configuration sources by precedence and interpolates the result.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    schema: Arc<SchemaRegistry>,
}

impl SourceLoader {
    pub const fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self { schema }
    }

    /// Read every source once and return the merged, interpolated raw values.
    ///
    /// Sources are applied from lowest to highest precedence; on equal
    /// precedence the one listed later wins. Keys the schema does not know are
    /// dropped, and a blank value never overrides a lower-precedence one.
    ///
    /// A sensitive value supplied by a source is taken verbatim; only the
    /// schema's own default for a sensitive key is treated as a template.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn load(&self, sources: &[Box<dyn ConfigSource>]) -> ConfigResult<BTreeMap<String, String>> {
        let mut ordered: Vec<&dyn ConfigSource> = sources.iter().map(|source| source.as_ref()).collect();
        // Stable sort keeps list order for equal ranks
        ordered.sort_by_key(|source| source.precedence());

        let mut merged: BTreeMap<String, String> = BTreeMap::new();
        let mut origins: BTreeMap<String, String> = BTreeMap::new();

        for source in ordered {
            let values = source.load()?;
            let source_name = source.name();
            let mut accepted = 0usize;

            for (key, value) in values {
                if !self.schema.contains(&key) || value.trim().is_empty() {
                    continue;
                }
                if let Some(previous) = origins.get(&key) {
                    debug!(key = %key, from = %previous, to = %source_name, "value overridden");
                }
                origins.insert(key.clone(), source_name.clone());
                merged.insert(key, value);
                accepted += 1;
            }

            debug!(source = %source_name, precedence = source.precedence(), keys = accepted, "source loaded");
        }

        let modes = self.value_modes(&merged);
        self.drop_unsatisfiable(&mut merged, &modes)?;
        interpolate_with(&merged, &modes)
    }

    fn value_modes(&self, merged: &BTreeMap<String, String>) -> BTreeMap<String, ValueMode> {
        merged
            .iter()
            .filter_map(|(name, value)| {
                let key = self.schema.get(name).ok()?;
                let mode = if key.is_sensitive() && key.default.as_deref() != Some(value.as_str()) {
                    ValueMode::Literal
                } else if key.key_type == KeyType::Url {
                    ValueMode::UrlTemplate
                } else {
                    ValueMode::Template
                };
                Some((name.clone(), mode))
            })
            .collect()
    }

    /// Remove values that reference a registered key with no value, until none
    /// remain, so validation reports the missing key rather than the template.
    fn drop_unsatisfiable(
        &self,
        merged: &mut BTreeMap<String, String>,
        modes: &BTreeMap<String, ValueMode>,
    ) -> ConfigResult<()> {
        loop {
            let mut unsatisfiable = Vec::new();
            for (key, value) in merged.iter() {
                if modes.get(key) == Some(&ValueMode::Literal) {
                    continue;
                }
                let missing = references(key, value)?
                    .into_iter()
                    .find(|name| self.schema.contains(name) && !merged.contains_key(name));
                if let Some(missing) = missing {
                    unsatisfiable.push((key.clone(), missing));
                }
            }
            if unsatisfiable.is_empty() {
                return Ok(());
            }
            for (key, missing) in unsatisfiable {
                debug!(key = %key, references = %missing, "value dropped, referenced key is unset");
                merged.remove(&key);
            }
        }
    }
}
