use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::ports::{precedence, ConfigSource};

use super::dotenv::is_valid_key;

/// A mounted secrets directory with one file per key.
///
/// This is the layout a Kubernetes secret volume produces. Hidden entries
/// (`..data` and friends) are skipped and symlinks are followed. A single
/// trailing newline is trimmed from each value.
#[derive(Debug, Clone)]
pub struct SecretDirSource {
    dir: PathBuf,
}

impl SecretDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_error(&self, reason: impl ToString) -> ConfigError {
        ConfigError::SourceRead {
            source_name: self.name(),
            reason: reason.to_string(),
        }
    }
}

impl ConfigSource for SecretDirSource {
    fn name(&self) -> String {
        format!("secret directory {}", self.dir.display())
    }

    fn precedence(&self) -> i32 {
        precedence::SECRETS
    }

    fn load(&self) -> ConfigResult<BTreeMap<String, String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| self.read_error(e))?;
        let mut values = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|e| self.read_error(e))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || !is_valid_key(&name) {
                continue;
            }
            let path = entry.path();
            if !fs::metadata(&path).is_ok_and(|m| m.is_file()) {
                continue;
            }

            let bytes = fs::read(&path).map_err(|e| self.read_error(format!("{name}: {e}")))?;
            let mut value = String::from_utf8(bytes)
                .map_err(|_| self.read_error(format!("{name}: not valid UTF-8")))?;
            if value.ends_with('\n') {
                value.pop();
                if value.ends_with('\r') {
                    value.pop();
                }
            }
            values.insert(name, value);
        }

        Ok(values)
    }
}
