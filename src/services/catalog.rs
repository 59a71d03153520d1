//! The CADE configuration keys.
//!
//! Mirrors the deployment's `.env` template: API server, WebSocket gateway,
//! authentication, PostgreSQL, Redis, Solana RPC, social-media credentials and
//! monitoring. `DATABASE_URL` and `REDIS_URL` are composite keys whose defaults
//! are templates over their constituent keys.

use crate::domain::errors::ConfigResult;
use crate::domain::models::{ConfigKey, KeyType};
use crate::services::SchemaRegistry;

pub const DATABASE_URL_TEMPLATE: &str =
    "postgresql://${POSTGRES_USER}:${POSTGRES_PASSWORD}@${POSTGRES_HOST}:${POSTGRES_PORT}/${POSTGRES_DB}";

pub const REDIS_URL_TEMPLATE: &str =
    "redis://:${REDIS_PASSWORD}@${REDIS_HOST}:${REDIS_PORT}/${REDIS_DB}";

fn api_keys() -> Vec<ConfigKey> {
    let group = "API";
    vec![
        ConfigKey::new("API_HOST", KeyType::String)
            .with_default("0.0.0.0")
            .describe("Address the API server binds to"),
        ConfigKey::new("API_PORT", KeyType::port())
            .with_default("8000")
            .describe("Port the API server listens on"),
        ConfigKey::new("API_WORKERS", KeyType::integer_in(1, 64))
            .with_default("4")
            .describe("Number of API worker processes"),
        ConfigKey::new("API_PREFIX", KeyType::String)
            .with_default("/api/v1")
            .describe("Route prefix for versioned endpoints"),
        ConfigKey::new(
            "ENVIRONMENT",
            KeyType::one_of(&["development", "staging", "production"]),
        )
        .with_default("development")
        .describe("Deployment environment"),
        ConfigKey::new("DEBUG", KeyType::Boolean)
            .with_default("false")
            .describe("Enable debug mode"),
        ConfigKey::new(
            "LOG_LEVEL",
            KeyType::one_of(&["trace", "debug", "info", "warn", "error"]),
        )
        .with_default("info")
        .describe("Application log level"),
        ConfigKey::new("CORS_ORIGINS", KeyType::List)
            .with_default("https://app.cadesol.ai,https://api.cadesol.ai")
            .describe("Comma-separated allowed CORS origins"),
        ConfigKey::new("RATE_LIMIT_PER_MINUTE", KeyType::integer_in(1, 100_000))
            .with_default("100")
            .describe("Requests allowed per client per minute"),
    ]
    .into_iter()
    .map(|key| key.in_group(group))
    .collect()
}

fn websocket_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("WS_MAX_CLIENTS", KeyType::integer_in(1, 1_000_000))
            .with_default("1000")
            .describe("Maximum concurrent WebSocket clients"),
        ConfigKey::new("WS_PING_INTERVAL", KeyType::Duration)
            .with_default("30s")
            .describe("Interval between WebSocket pings"),
        ConfigKey::new("WS_PING_TIMEOUT", KeyType::Duration)
            .with_default("10s")
            .describe("Time to wait for a pong before dropping the client"),
        ConfigKey::new("WS_MAX_MESSAGE_SIZE", KeyType::integer_in(1, 67_108_864))
            .with_default("1048576")
            .describe("Maximum WebSocket message size in bytes"),
    ]
    .into_iter()
    .map(|key| key.in_group("WebSocket"))
    .collect()
}

fn security_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("JWT_SECRET_KEY", KeyType::String)
            .required()
            .secret()
            .describe("Signing key for access tokens"),
        ConfigKey::new("JWT_ALGORITHM", KeyType::one_of(&["HS256", "HS384", "HS512"]))
            .with_default("HS256")
            .describe("JWT signing algorithm"),
        ConfigKey::new("JWT_EXPIRATION", KeyType::Duration)
            .with_default("1h")
            .describe("Access token lifetime"),
        ConfigKey::new("REFRESH_TOKEN_EXPIRATION", KeyType::Duration)
            .with_default("24h")
            .describe("Refresh token lifetime"),
        ConfigKey::new("REQUIRE_API_KEY", KeyType::Boolean)
            .with_default("true")
            .describe("Reject requests without an API key"),
    ]
    .into_iter()
    .map(|key| key.in_group("Security"))
    .collect()
}

fn database_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("POSTGRES_HOST", KeyType::String)
            .with_default("localhost")
            .describe("PostgreSQL host"),
        ConfigKey::new("POSTGRES_PORT", KeyType::port())
            .with_default("5432")
            .describe("PostgreSQL port"),
        ConfigKey::new("POSTGRES_USER", KeyType::String)
            .required()
            .describe("PostgreSQL user"),
        ConfigKey::new("POSTGRES_PASSWORD", KeyType::String)
            .required()
            .secret()
            .describe("PostgreSQL password"),
        ConfigKey::new("POSTGRES_DB", KeyType::String)
            .with_default("cade")
            .describe("PostgreSQL database name"),
        ConfigKey::new("DATABASE_URL", KeyType::Url)
            .with_default(DATABASE_URL_TEMPLATE)
            .secret()
            .describe("Connection string; built from the POSTGRES_* keys unless set"),
        ConfigKey::new("DATABASE_POOL_SIZE", KeyType::integer_in(1, 500))
            .with_default("10")
            .describe("Database connection pool size"),
    ]
    .into_iter()
    .map(|key| key.in_group("Database"))
    .collect()
}

fn cache_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("REDIS_HOST", KeyType::String)
            .with_default("localhost")
            .describe("Redis host"),
        ConfigKey::new("REDIS_PORT", KeyType::port())
            .with_default("6379")
            .describe("Redis port"),
        ConfigKey::new("REDIS_PASSWORD", KeyType::String)
            .required()
            .secret()
            .describe("Redis password"),
        ConfigKey::new("REDIS_DB", KeyType::integer_in(0, 15))
            .with_default("0")
            .describe("Redis logical database index"),
        ConfigKey::new("REDIS_URL", KeyType::Url)
            .with_default(REDIS_URL_TEMPLATE)
            .secret()
            .describe("Connection string; built from the REDIS_* keys unless set"),
        ConfigKey::new("CACHE_TTL", KeyType::Duration)
            .with_default("5m")
            .describe("Default cache entry lifetime"),
    ]
    .into_iter()
    .map(|key| key.in_group("Cache"))
    .collect()
}

fn blockchain_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("SOLANA_RPC_URL", KeyType::Url)
            .with_default("https://api.mainnet-beta.solana.com")
            .describe("Solana JSON-RPC endpoint"),
        ConfigKey::new("SOLANA_WS_URL", KeyType::Url)
            .with_default("wss://api.mainnet-beta.solana.com")
            .describe("Solana WebSocket endpoint"),
        ConfigKey::new("HELIUS_API_KEY", KeyType::String)
            .secret()
            .describe("Helius RPC API key"),
        ConfigKey::new("RPC_TIMEOUT", KeyType::Duration)
            .with_default("30s")
            .describe("Timeout for RPC requests"),
    ]
    .into_iter()
    .map(|key| key.in_group("Blockchain"))
    .collect()
}

fn social_keys() -> Vec<ConfigKey> {
    [
        ("TWITTER_API_KEY", "Twitter API key"),
        ("TWITTER_API_SECRET", "Twitter API secret"),
        ("TWITTER_BEARER_TOKEN", "Twitter bearer token"),
        ("TELEGRAM_BOT_TOKEN", "Telegram bot token"),
        ("DISCORD_BOT_TOKEN", "Discord bot token"),
    ]
    .into_iter()
    .map(|(name, description)| {
        ConfigKey::new(name, KeyType::String)
            .secret()
            .describe(description)
            .in_group("Social")
    })
    .collect()
}

fn monitoring_keys() -> Vec<ConfigKey> {
    vec![
        ConfigKey::new("METRICS_ENABLED", KeyType::Boolean)
            .with_default("true")
            .describe("Expose Prometheus metrics"),
        ConfigKey::new("PROMETHEUS_PORT", KeyType::port())
            .with_default("9090")
            .describe("Port for the metrics endpoint"),
        ConfigKey::new("SENTRY_DSN", KeyType::Url)
            .secret()
            .describe("Sentry error reporting DSN"),
    ]
    .into_iter()
    .map(|key| key.in_group("Monitoring"))
    .collect()
}

/// Build the CADE schema, failing on a duplicated key name.
pub fn try_cade_schema() -> ConfigResult<SchemaRegistry> {
    let mut schema = SchemaRegistry::new();
    for group in [
        api_keys(),
        websocket_keys(),
        security_keys(),
        database_keys(),
        cache_keys(),
        blockchain_keys(),
        social_keys(),
        monitoring_keys(),
    ] {
        schema.register_all(group)?;
    }
    Ok(schema)
}

/// The CADE schema.
pub fn cade_schema() -> SchemaRegistry {
    try_cade_schema().expect("built-in CADE schema has unique key names")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::interpolation::references;

    #[test]
    fn test_schema_builds() {
        let schema = try_cade_schema().expect("CADE schema should build");
        assert!(schema.len() > 30);
        assert!(schema.get("JWT_SECRET_KEY").unwrap().is_sensitive());
        assert!(schema.get("POSTGRES_USER").unwrap().required);
        assert_eq!(schema.get("DATABASE_URL").unwrap().group, "Database");
    }

    #[test]
    fn test_templates_only_reference_registered_keys() {
        let schema = cade_schema();
        for key in schema.keys() {
            if let Some(default) = &key.default {
                for reference in references(&key.name, default).unwrap() {
                    assert!(
                        schema.contains(&reference),
                        "{} references unregistered {}",
                        key.name,
                        reference
                    );
                }
            }
        }
    }

    #[test]
    fn test_secret_keys_have_no_literal_defaults() {
        for key in cade_schema().keys().filter(|k| k.is_sensitive()) {
            if let Some(default) = &key.default {
                assert!(default.contains("${"), "{} has a literal secret default", key.name);
            }
        }
    }
}
