use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::{ConfigKey, ConfigValue, KeyType};
use crate::services::{ResolvedConfig, SchemaRegistry};

/// Placeholder written in place of sensitive values.
pub const REDACTED: &str = "[REDACTED]";

const TRUTHY: [&str; 4] = ["true", "1", "yes", "on"];
const FALSY: [&str; 4] = ["false", "0", "no", "off"];

/// Turns merged raw strings into a typed [`ResolvedConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub const fn new() -> Self {
        Self
    }

    /// Check every registered key against `raw`.
    ///
    /// Blank values count as absent. Every key is checked; when several fail,
    /// all failures are logged by key name and the first one in registration
    /// order is returned.
    #[instrument(skip_all, fields(keys = schema.len()))]
    pub fn validate(
        &self,
        raw: &BTreeMap<String, String>,
        schema: &Arc<SchemaRegistry>,
    ) -> ConfigResult<ResolvedConfig> {
        let mut values = BTreeMap::new();
        let mut failures: Vec<ConfigError> = Vec::new();

        for key in schema.keys() {
            let present = raw
                .get(&key.name)
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty());

            let candidate = match present {
                Some(value) => Some(value.to_string()),
                None if key.required => {
                    warn!(key = %key.name, "required configuration key is missing");
                    failures.push(ConfigError::MissingRequiredKey(key.name.clone()));
                    continue;
                }
                // Raw defaults are normally merged in by the loader already;
                // this covers resolutions run without a defaults source.
                None => key.default.clone().filter(|d| !d.contains("${")),
            };

            let Some(candidate) = candidate else {
                debug!(key = %key.name, "optional key left unset");
                continue;
            };

            match coerce(key, &candidate) {
                Ok(value) => {
                    if key.is_sensitive() {
                        debug!(key = %key.name, value = REDACTED, "key resolved");
                    } else {
                        debug!(key = %key.name, value = %value, "key resolved");
                    }
                    values.insert(key.name.clone(), value);
                }
                Err(err) => {
                    warn!(key = %key.name, expected = %key.key_type, "configuration value rejected");
                    failures.push(err);
                }
            }
        }

        if failures.len() > 1 {
            warn!(
                failed = failures.len(),
                keys = %failures.iter().filter_map(ConfigError::key).collect::<Vec<_>>().join(","),
                "multiple configuration keys are invalid"
            );
        }
        if let Some(first) = failures.into_iter().next() {
            return Err(first);
        }

        Ok(ResolvedConfig::new(Arc::clone(schema), values))
    }
}

/// Coerce one raw value to the key's declared type.
///
/// Error details never include the value of a sensitive key.
pub fn coerce(key: &ConfigKey, raw: &str) -> ConfigResult<ConfigValue> {
    let raw_trimmed = raw.trim();
    let mismatch = |detail: Option<String>| ConfigError::TypeCoercion {
        key: key.name.clone(),
        expected: key.key_type.to_string(),
        detail: if key.is_sensitive() { None } else { detail },
    };
    let got = || Some(format!("got '{raw_trimmed}'"));

    match &key.key_type {
        KeyType::String => Ok(ConfigValue::String(raw.to_string())),
        KeyType::Integer { min, max } => {
            let value: i64 = raw_trimmed
                .replace('_', "")
                .parse()
                .map_err(|_| mismatch(got()))?;
            let lo = min.unwrap_or(i64::MIN);
            let hi = max.unwrap_or(i64::MAX);
            if value < lo || value > hi {
                if key.is_sensitive() {
                    return Err(mismatch(None));
                }
                return Err(ConfigError::OutOfRange {
                    key: key.name.clone(),
                    value,
                    min: lo,
                    max: hi,
                });
            }
            Ok(ConfigValue::Integer(value))
        }
        KeyType::Float => raw_trimmed
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(ConfigValue::Float)
            .ok_or_else(|| mismatch(got())),
        KeyType::Boolean => parse_bool(raw_trimmed)
            .map(ConfigValue::Boolean)
            .ok_or_else(|| mismatch(got())),
        KeyType::Url => {
            let url = Url::parse(raw_trimmed).map_err(|e| mismatch(Some(e.to_string())))?;
            if !url.has_host() {
                return Err(mismatch(Some("URL has no host".to_string())));
            }
            Ok(ConfigValue::Url(url))
        }
        KeyType::Duration => parse_duration(raw_trimmed)
            .map(ConfigValue::Duration)
            .ok_or_else(|| mismatch(got())),
        KeyType::Enum { variants } => variants
            .iter()
            .find(|v| v.eq_ignore_ascii_case(raw_trimmed))
            .map(|v| ConfigValue::Enum(v.clone()))
            .ok_or_else(|| mismatch(got())),
        KeyType::List => Ok(ConfigValue::List(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )),
    }
}

/// Parse a boolean from the fixed truthy/falsy vocabulary (case-insensitive).
pub fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_ascii_lowercase();
    if TRUTHY.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSY.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Parse `250ms`, `30s`, `5m`, `1h`, `2d`, or bare seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);
    let number: u64 = number.parse().ok()?;

    let secs = |multiplier: u64| number.checked_mul(multiplier).map(Duration::from_secs);
    match unit.trim() {
        "ms" => Some(Duration::from_millis(number)),
        "" | "s" => secs(1),
        "m" => secs(60),
        "h" => secs(3600),
        "d" => secs(86_400),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ConfigKey;

    fn key(name: &str, key_type: KeyType) -> ConfigKey {
        ConfigKey::new(name, key_type)
    }

    #[test]
    fn test_parse_bool_vocabulary() {
        for truthy in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(parse_bool(truthy), Some(true), "{truthy}");
        }
        for falsy in ["false", "0", "NO", "off"] {
            assert_eq!(parse_bool(falsy), Some(false), "{falsy}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool("y"), None);
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("2d"), Some(Duration::from_secs(172_800)));
        assert_eq!(parse_duration("1w"), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("-5s"), None);
    }

    #[test]
    fn test_coerce_integer_with_separators() {
        let value = coerce(&key("WS_MAX_MESSAGE_SIZE", KeyType::integer()), "1_048_576").unwrap();
        assert_eq!(value, ConfigValue::Integer(1_048_576));
    }

    #[test]
    fn test_coerce_integer_out_of_range() {
        let err = coerce(&key("API_PORT", KeyType::port()), "70000").unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                key: "API_PORT".into(),
                value: 70000,
                min: 1,
                max: 65535
            }
        );
    }

    #[test]
    fn test_coerce_integer_failure_mentions_plain_value() {
        let err = coerce(&key("API_PORT", KeyType::port()), "eighty").unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_coerce_failure_hides_sensitive_value() {
        let secret = key("JWT_TTL_SECRET", KeyType::integer()).secret();
        let err = coerce(&secret, "hunter2").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
        assert!(err.to_string().contains("JWT_TTL_SECRET"));
    }

    #[test]
    fn test_coerce_enum_canonicalises() {
        let jwt = key("JWT_ALGORITHM", KeyType::one_of(&["HS256", "HS512"]));
        assert_eq!(
            coerce(&jwt, "hs512").unwrap(),
            ConfigValue::Enum("HS512".into())
        );
        assert!(coerce(&jwt, "RS256").is_err());
    }

    #[test]
    fn test_coerce_list_trims_blanks() {
        let value = coerce(&key("CORS_ORIGINS", KeyType::List), " https://a , ,https://b,").unwrap();
        assert_eq!(
            value,
            ConfigValue::List(vec!["https://a".into(), "https://b".into()])
        );
    }

    #[test]
    fn test_coerce_url_requires_host() {
        let url_key = key("SOLANA_RPC_URL", KeyType::Url);
        assert!(coerce(&url_key, "https://api.mainnet-beta.solana.com").is_ok());
        assert!(coerce(&url_key, "mailto:ops@cadesol.ai").is_err());
        assert!(coerce(&url_key, "not a url").is_err());
    }

    #[test]
    fn test_coerce_float() {
        let threshold = key("ANOMALY_THRESHOLD", KeyType::Float);
        assert_eq!(coerce(&threshold, "0.85").unwrap(), ConfigValue::Float(0.85));
        assert!(coerce(&threshold, "NaN").is_err());
    }

    fn schema(keys: Vec<ConfigKey>) -> Arc<SchemaRegistry> {
        let mut schema = SchemaRegistry::new();
        schema.register_all(keys).unwrap();
        Arc::new(schema)
    }

    #[test]
    fn test_validate_missing_required() {
        let schema = schema(vec![
            key("POSTGRES_HOST", KeyType::String).with_default("localhost"),
            key("POSTGRES_USER", KeyType::String).required(),
        ]);
        let err = Validator::new()
            .validate(&BTreeMap::new(), &schema)
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingRequiredKey("POSTGRES_USER".into()));
    }

    #[test]
    fn test_validate_blank_counts_as_absent() {
        let schema = schema(vec![key("JWT_SECRET_KEY", KeyType::String).required().secret()]);
        let raw = BTreeMap::from([("JWT_SECRET_KEY".to_string(), "   ".to_string())]);
        assert_eq!(
            Validator::new().validate(&raw, &schema).unwrap_err(),
            ConfigError::MissingRequiredKey("JWT_SECRET_KEY".into())
        );
    }

    #[test]
    fn test_validate_first_failure_in_registration_order() {
        let schema = schema(vec![
            key("B_PORT", KeyType::port()),
            key("A_FLAG", KeyType::Boolean),
        ]);
        let raw = BTreeMap::from([
            ("A_FLAG".to_string(), "perhaps".to_string()),
            ("B_PORT".to_string(), "0".to_string()),
        ]);
        let err = Validator::new().validate(&raw, &schema).unwrap_err();
        assert_eq!(err.key(), Some("B_PORT"));
    }

    #[test]
    fn test_validate_applies_plain_default_without_loader() {
        let schema = schema(vec![
            key("API_PORT", KeyType::port()).with_default("8000"),
            key("SENTRY_DSN", KeyType::Url),
        ]);
        let config = Validator::new().validate(&BTreeMap::new(), &schema).unwrap();
        assert_eq!(config.get("API_PORT").unwrap(), Some(&ConfigValue::Integer(8000)));
        assert_eq!(config.get("SENTRY_DSN").unwrap(), None);
    }
}
