//! Domain errors for configuration resolution and deployment topology.

use thiserror::Error;

/// Format a reference cycle as a human-readable string: `A -> B -> A`.
fn format_cycle_path(path: &[String]) -> String {
    let mut rendered = path.join(" -> ");
    if let Some(first) = path.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}

/// Errors raised while building, resolving or reading configuration.
///
/// Every variant names the offending key. None of them carry the value of a
/// sensitive key, so they are safe to print to an operator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Configuration key registered twice: {0}")]
    DuplicateKey(String),

    #[error("Missing required configuration key: {0}")]
    MissingRequiredKey(String),

    #[error("Invalid value for {key}: expected {expected}{}", format_detail(.detail))]
    TypeCoercion {
        key: String,
        expected: String,
        detail: Option<String>,
    },

    #[error("Value for {key} is out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Circular reference between configuration keys: {}", format_cycle_path(.0))]
    CircularReference(Vec<String>),

    #[error("Configuration key {key} references {reference}, which has no value")]
    UnresolvedReference { key: String, reference: String },

    #[error("Configuration key {key} contains an unterminated ${{...}} reference")]
    MalformedReference { key: String },

    #[error("Configuration key {key} holds a {actual} value, not {requested}")]
    TypeMismatch {
        key: String,
        requested: &'static str,
        actual: &'static str,
    },

    #[error("Failed to read configuration source {source_name}: {reason}")]
    SourceRead { source_name: String, reason: String },

    #[error("Invalid resolution state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },
}

fn format_detail(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl ConfigError {
    /// Name of the configuration key this error is about, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownKey(key) | Self::DuplicateKey(key) | Self::MissingRequiredKey(key) => {
                Some(key)
            }
            Self::TypeCoercion { key, .. }
            | Self::OutOfRange { key, .. }
            | Self::UnresolvedReference { key, .. }
            | Self::MalformedReference { key }
            | Self::TypeMismatch { key, .. } => Some(key),
            Self::CircularReference(path) => path.first().map(String::as_str),
            Self::SourceRead { .. } | Self::InvalidStateTransition { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A single problem found in a deployment topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyIssue {
    pub service: String,
    pub reason: String,
}

impl std::fmt::Display for TopologyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.service, self.reason)
    }
}

/// Errors raised while loading or validating a deployment topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Failed to load topology: {0}")]
    Load(String),

    #[error("Topology validation failed: {}", format_issues(.0))]
    Invalid(Vec<TopologyIssue>),
}

fn format_issues(issues: &[TopologyIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<figment::Error> for TopologyError {
    fn from(err: figment::Error) -> Self {
        Self::Load(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_path_closes_loop() {
        let err = ConfigError::CircularReference(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            err.to_string(),
            "Circular reference between configuration keys: A -> B -> A"
        );
    }

    #[test]
    fn test_type_coercion_without_detail() {
        let err = ConfigError::TypeCoercion {
            key: "JWT_SECRET_KEY".to_string(),
            expected: "string".to_string(),
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for JWT_SECRET_KEY: expected string"
        );
    }

    #[test]
    fn test_type_coercion_with_detail() {
        let err = ConfigError::TypeCoercion {
            key: "API_PORT".to_string(),
            expected: "integer".to_string(),
            detail: Some("got 'abc'".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for API_PORT: expected integer (got 'abc')"
        );
    }

    #[test]
    fn test_key_accessor() {
        assert_eq!(
            ConfigError::MissingRequiredKey("POSTGRES_USER".into()).key(),
            Some("POSTGRES_USER")
        );
        assert_eq!(
            ConfigError::SourceRead {
                source_name: "env".into(),
                reason: "boom".into()
            }
            .key(),
            None
        );
    }

    #[test]
    fn test_topology_issues_joined() {
        let err = TopologyError::Invalid(vec![
            TopologyIssue {
                service: "api".into(),
                reason: "replicas must be at least 1".into(),
            },
            TopologyIssue {
                service: "redis".into(),
                reason: "image must not be empty".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Topology validation failed: api: replicas must be at least 1; redis: image must not be empty"
        );
    }
}
