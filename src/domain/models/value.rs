use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::domain::errors::ConfigError;

/// A validated, typed configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Url(Url),
    #[serde(serialize_with = "serialize_duration")]
    Duration(Duration),
    Enum(String),
    List(Vec<String>),
}

fn serialize_duration<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_duration(*d))
}

/// Render a duration the way it would be written in an env file.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis % 1000 != 0 {
        return format!("{millis}ms");
    }
    let secs = d.as_secs();
    if secs == 0 {
        "0s".to_string()
    } else if secs % 86_400 == 0 {
        format!("{}d", secs / 86_400)
    } else if secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

impl ConfigValue {
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Url(_) => "url",
            Self::Duration(_) => "duration",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Enum(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Url(u) => f.write_str(u.as_str()),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Conversion from a stored [`ConfigValue`] into a concrete Rust type.
pub trait FromConfigValue: Sized {
    /// Type name reported in [`ConfigError::TypeMismatch`].
    const TYPE_NAME: &'static str;

    fn from_config_value(value: &ConfigValue) -> Option<Self>;

    fn extract(key: &str, value: &ConfigValue) -> Result<Self, ConfigError> {
        Self::from_config_value(value).ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            requested: Self::TYPE_NAME,
            actual: value.type_name(),
        })
    }
}

impl FromConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) | ConfigValue::Enum(s) => Some(s.clone()),
            ConfigValue::Url(u) => Some(u.to_string()),
            _ => None,
        }
    }
}

impl FromConfigValue for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

macro_rules! impl_from_config_integer {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_config_value(value: &ConfigValue) -> Option<Self> {
                    match value {
                        ConfigValue::Integer(i) => <$ty>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_config_integer!(u16, u32, u64, usize);

impl FromConfigValue for f64 {
    const TYPE_NAME: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Float(x) => Some(*x),
            ConfigValue::Integer(i) => Some(*i as Self),
            _ => None,
        }
    }
}

impl FromConfigValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromConfigValue for Url {
    const TYPE_NAME: &'static str = "url";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Url(u) => Some(u.clone()),
            _ => None,
        }
    }
}

impl FromConfigValue for Duration {
    const TYPE_NAME: &'static str = "duration";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromConfigValue for Vec<String> {
    const TYPE_NAME: &'static str = "list";

    fn from_config_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}
