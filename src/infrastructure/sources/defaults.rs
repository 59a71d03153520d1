use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::errors::ConfigResult;
use crate::domain::ports::{precedence, ConfigSource};
use crate::services::SchemaRegistry;

/// Defaults declared in the schema, at the lowest precedence.
///
/// Defaults join the merge like any other source so that templated defaults
/// (`DATABASE_URL`) are interpolated against whichever source won for each
/// constituent key.
#[derive(Debug, Clone)]
pub struct DefaultsSource {
    schema: Arc<SchemaRegistry>,
}

impl DefaultsSource {
    pub const fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self { schema }
    }
}

impl ConfigSource for DefaultsSource {
    fn name(&self) -> String {
        "defaults".to_string()
    }

    fn precedence(&self) -> i32 {
        precedence::DEFAULTS
    }

    fn load(&self) -> ConfigResult<BTreeMap<String, String>> {
        Ok(self
            .schema
            .keys()
            .filter_map(|key| Some((key.name.clone(), key.default.clone()?)))
            .collect())
    }
}
