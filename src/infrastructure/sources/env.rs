use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::ports::{precedence, ConfigSource};

use super::dotenv;

/// Values from the process environment.
///
/// With a prefix, only variables starting with it are read and the prefix is
/// stripped (`CADE_API_PORT` becomes `API_PORT`).
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: Option<String>,
    snapshot: Option<BTreeMap<String, String>>,
}

impl EnvSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// Use a fixed set of variables instead of the live environment
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            prefix: None,
            snapshot: Some(vars),
        }
    }

    fn strip(&self, name: String) -> Option<String> {
        match &self.prefix {
            Some(prefix) => name.strip_prefix(prefix.as_str()).map(str::to_string),
            None => Some(name),
        }
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("environment ({prefix}*)"),
            None => "environment".to_string(),
        }
    }

    fn precedence(&self) -> i32 {
        precedence::ENVIRONMENT
    }

    fn load(&self) -> ConfigResult<BTreeMap<String, String>> {
        let vars: Vec<(String, String)> = match &self.snapshot {
            Some(snapshot) => snapshot.clone().into_iter().collect(),
            // Non-UTF-8 variables cannot name a schema key; skip them
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        };

        Ok(vars
            .into_iter()
            .filter_map(|(name, value)| self.strip(name).map(|name| (name, value)))
            .filter(|(name, _)| !name.is_empty())
            .collect())
    }
}

/// Values from a dotenv-format file such as `.env`.
#[derive(Debug, Clone)]
pub struct EnvFileSource {
    path: PathBuf,
    precedence: i32,
    optional: bool,
}

impl EnvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            precedence: precedence::ENV_FILE,
            optional: false,
        }
    }

    /// A mounted secrets file in dotenv format; ranks above the environment
    pub fn secrets(path: impl Into<PathBuf>) -> Self {
        Self {
            precedence: precedence::SECRETS,
            ..Self::new(path)
        }
    }

    /// Treat a missing file as empty instead of failing
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl ConfigSource for EnvFileSource {
    fn name(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn precedence(&self) -> i32 {
        self.precedence
    }

    fn load(&self) -> ConfigResult<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if self.optional && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(err) => {
                return Err(ConfigError::SourceRead {
                    source_name: self.name(),
                    reason: err.to_string(),
                })
            }
        };

        dotenv::parse(&content).map_err(|err| ConfigError::SourceRead {
            source_name: self.name(),
            reason: err.to_string(),
        })
    }
}
