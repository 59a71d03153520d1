use std::collections::HashMap;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::ConfigKey;

/// Registry of every configuration key the process recognises.
///
/// Populated once at startup, then wrapped in an `Arc` and only read.
/// Iteration follows registration order so diagnostics and templates are
/// stable.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    keys: Vec<ConfigKey>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key, rejecting names that are already present
    pub fn register(&mut self, key: ConfigKey) -> ConfigResult<()> {
        if self.index.contains_key(&key.name) {
            return Err(ConfigError::DuplicateKey(key.name));
        }
        self.index.insert(key.name.clone(), self.keys.len());
        self.keys.push(key);
        Ok(())
    }

    /// Register several keys, stopping at the first duplicate
    pub fn register_all(&mut self, keys: impl IntoIterator<Item = ConfigKey>) -> ConfigResult<()> {
        keys.into_iter().try_for_each(|key| self.register(key))
    }

    pub fn get(&self, name: &str) -> ConfigResult<&ConfigKey> {
        self.index
            .get(name)
            .map(|&i| &self.keys[i])
            .ok_or_else(|| ConfigError::UnknownKey(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether the named key is registered as a secret
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.get(name).is_ok_and(ConfigKey::is_sensitive)
    }
}
