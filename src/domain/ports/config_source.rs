use std::collections::BTreeMap;

use crate::domain::errors::ConfigResult;

/// Precedence ranks of the built-in sources. Higher rank overrides lower.
pub mod precedence {
    pub const DEFAULTS: i32 = 0;
    pub const ENV_FILE: i32 = 100;
    pub const ENVIRONMENT: i32 = 200;
    pub const SECRETS: i32 = 300;
}

/// An origin of raw configuration values.
///
/// Sources return plain strings; typing happens later, in the validator.
/// A source is read exactly once per resolution.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use cade_config::domain::errors::ConfigResult;
/// use cade_config::domain::ports::ConfigSource;
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> String {
///         "fixed".to_string()
///     }
///
///     fn precedence(&self) -> i32 {
///         50
///     }
///
///     fn load(&self) -> ConfigResult<BTreeMap<String, String>> {
///         Ok(BTreeMap::from([("API_PORT".to_string(), "9000".to_string())]))
///     }
/// }
///
/// assert_eq!(Fixed.load().unwrap()["API_PORT"], "9000");
/// ```
pub trait ConfigSource: Send + Sync {
    /// Human-readable name used in logs and diagnostics
    fn name(&self) -> String;

    /// Rank of this source; the higher rank wins when keys collide
    fn precedence(&self) -> i32;

    /// Read all values this source provides
    fn load(&self) -> ConfigResult<BTreeMap<String, String>>;
}
