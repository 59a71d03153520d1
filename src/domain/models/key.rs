use serde::Serialize;
use std::fmt;

/// Declared type of a configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum KeyType {
    String,
    /// Signed integer, optionally bounded (inclusive).
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Float,
    Boolean,
    Url,
    Duration,
    /// One of a fixed set of variants, matched case-insensitively.
    Enum { variants: Vec<String> },
    /// Comma-separated list of strings.
    List,
}

impl KeyType {
    /// Unbounded integer.
    pub const fn integer() -> Self {
        Self::Integer {
            min: None,
            max: None,
        }
    }

    /// Integer bounded to `[min, max]`.
    pub const fn integer_in(min: i64, max: i64) -> Self {
        Self::Integer {
            min: Some(min),
            max: Some(max),
        }
    }

    /// TCP/UDP port number.
    pub const fn port() -> Self {
        Self::integer_in(1, 65_535)
    }

    pub fn one_of(variants: &[&str]) -> Self {
        Self::Enum {
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    /// Short type name used in diagnostics and templates.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer { .. } => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Url => "url",
            Self::Duration => "duration",
            Self::Enum { .. } => "enum",
            Self::List => "list",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer {
                min: Some(min),
                max: Some(max),
            } => write!(f, "integer in [{min}, {max}]"),
            Self::Integer {
                min: Some(min),
                max: None,
            } => write!(f, "integer >= {min}"),
            Self::Integer {
                min: None,
                max: Some(max),
            } => write!(f, "integer <= {max}"),
            Self::Enum { variants } => write!(f, "one of {}", variants.join("|")),
            other => f.write_str(other.name()),
        }
    }
}

/// Whether a key's value may be shown in logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Plain,
    Secret,
}

/// A recognised configuration key.
///
/// Defaults are raw strings and go through the same interpolation and coercion
/// as values read from any other source, so a default may be a template such as
/// `postgresql://${POSTGRES_USER}@${POSTGRES_HOST}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigKey {
    pub name: String,
    pub key_type: KeyType,
    pub default: Option<String>,
    pub required: bool,
    pub sensitivity: Sensitivity,
    pub group: String,
    pub description: String,
}

impl ConfigKey {
    pub fn new(name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
            default: None,
            required: false,
            sensitivity: Sensitivity::Plain,
            group: "General".to_string(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn secret(mut self) -> Self {
        self.sensitivity = Sensitivity::Secret;
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitivity == Sensitivity::Secret
    }
}
