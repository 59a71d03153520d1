//! Command-line interface for `cade-config`.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, SourceArgs, TopologyCommands};

use console::style;

use crate::domain::errors::ConfigError;
use crate::infrastructure::logging::SecretScrubber;

/// Print a diagnostic for a failed command and exit with status 1.
///
/// The message names the offending key where there is one; sensitive values
/// never reach it, and the scrubber removes anything that looks like one.
pub fn handle_error(err: &anyhow::Error, scrubber: &SecretScrubber, json_mode: bool) -> ! {
    let message = format!("{err:#}");
    let message = scrubber.scrub(&message);
    let key = err.downcast_ref::<ConfigError>().and_then(ConfigError::key);

    if json_mode {
        let body = serde_json::json!({ "error": message, "key": key });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {message}", style("error:").red().bold());
    }
    std::process::exit(1)
}
