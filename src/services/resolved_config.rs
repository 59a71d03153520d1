use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::{ConfigValue, FromConfigValue};
use crate::services::SchemaRegistry;

/// Mask shown instead of sensitive values in redacted views.
pub const MASK: &str = "********";

/// Immutable, validated configuration snapshot.
///
/// Built once by the resolver and handed to the rest of the process. Cloning
/// shares the same underlying data; there is no way to change a value after
/// construction, so the handle can be read from any number of threads without
/// locking.
#[derive(Clone)]
pub struct ResolvedConfig {
    inner: Arc<Inner>,
}

struct Inner {
    schema: Arc<SchemaRegistry>,
    values: BTreeMap<String, ConfigValue>,
}

impl ResolvedConfig {
    pub(crate) fn new(schema: Arc<SchemaRegistry>, values: BTreeMap<String, ConfigValue>) -> Self {
        Self {
            inner: Arc::new(Inner { schema, values }),
        }
    }

    /// Value of a registered key; `None` when the key is optional and unset
    pub fn get(&self, name: &str) -> ConfigResult<Option<&ConfigValue>> {
        self.inner.schema.get(name)?;
        Ok(self.inner.values.get(name))
    }

    /// Typed value of a registered key
    ///
    /// ```
    /// # use std::collections::BTreeMap;
    /// # use cade_config::infrastructure::sources::EnvSource;
    /// # use cade_config::services::{catalog, ConfigResolver};
    /// let env = EnvSource::from_map(BTreeMap::from([
    ///     ("POSTGRES_USER".to_string(), "cade_user".to_string()),
    ///     ("POSTGRES_PASSWORD".to_string(), "secret".to_string()),
    ///     ("REDIS_PASSWORD".to_string(), "cache".to_string()),
    ///     ("JWT_SECRET_KEY".to_string(), "jwt".to_string()),
    /// ]));
    /// let config = ConfigResolver::new(catalog::cade_schema())
    ///     .with_source(env)
    ///     .resolve()
    ///     .unwrap();
    /// let port: Option<u16> = config.get_as("API_PORT").unwrap();
    /// assert_eq!(port, Some(8000));
    /// ```
    pub fn get_as<T: FromConfigValue>(&self, name: &str) -> ConfigResult<Option<T>> {
        self.get(name)?
            .map(|value| T::extract(name, value))
            .transpose()
    }

    /// Typed value that must be set
    pub fn require<T: FromConfigValue>(&self, name: &str) -> ConfigResult<T> {
        self.get_as(name)?
            .ok_or_else(|| ConfigError::MissingRequiredKey(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.values.contains_key(name)
    }

    /// Number of keys holding a value
    pub fn len(&self) -> usize {
        self.inner.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values.is_empty()
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.inner.schema
    }

    /// Set values in schema registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.inner.schema.keys().filter_map(|key| {
            self.inner
                .values
                .get(&key.name)
                .map(|value| (key.name.as_str(), value))
        })
    }

    /// Display strings for every set key, with sensitive values masked
    pub fn redacted(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, value)| {
                let shown = if self.inner.schema.is_sensitive(name) {
                    MASK.to_string()
                } else {
                    value.to_string()
                };
                (name.to_string(), shown)
            })
            .collect()
    }

    /// Values of every set sensitive key, for log scrubbing
    pub fn secret_values(&self) -> Vec<String> {
        self.iter()
            .filter(|(name, _)| self.inner.schema.is_sensitive(name))
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.redacted()).finish()
    }
}
