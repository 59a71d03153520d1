//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::infrastructure::logging::{LogConfig, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "cade-config")]
#[command(about = "CADE deployment configuration resolver", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(flatten)]
    pub logging: LogArgs,
}

/// Where configuration values are read from, lowest precedence first:
/// schema defaults, env file, process environment, secrets.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Dotenv file read below the process environment
    #[arg(long, env = "CADE_ENV_FILE", global = true)]
    pub env_file: Option<PathBuf>,

    /// Mounted secrets file (dotenv format), overrides the environment
    #[arg(long, env = "CADE_SECRETS_FILE", global = true)]
    pub secrets_file: Option<PathBuf>,

    /// Mounted secrets directory (one file per key), overrides the environment
    #[arg(long, env = "CADE_SECRETS_DIR", global = true)]
    pub secrets_dir: Option<PathBuf>,

    /// Only read environment variables with this prefix, stripping it
    #[arg(long, global = true)]
    pub env_prefix: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CADE_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Also write JSON logs to rolling files in this directory
    #[arg(long, env = "CADE_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

impl From<&LogArgs> for LogConfig {
    fn from(args: &LogArgs) -> Self {
        Self {
            level: args.log_level.clone(),
            format: args.log_format,
            log_dir: args.log_dir.clone(),
            ..Self::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the configuration and report whether it is valid
    Check,

    /// Resolve the configuration and print it with secrets masked
    Show {
        /// Only show keys in this group (e.g. Database)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List every recognised configuration key
    Schema,

    /// Write a `.env.example` for the schema
    Template {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Deployment topology commands
    #[command(subcommand)]
    Topology(TopologyCommands),
}

#[derive(Subcommand, Debug)]
pub enum TopologyCommands {
    /// Load and validate a topology
    Validate {
        #[command(flatten)]
        input: TopologyInput,
    },

    /// Render Kubernetes manifests for a topology
    Render {
        #[command(flatten)]
        input: TopologyInput,

        /// Also resolve the configuration and render the `cade-config` ConfigMap
        #[arg(long)]
        with_config_map: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TopologyInput {
    /// Topology YAML merged over the built-in CADE layout
    #[arg(short, long, env = "CADE_TOPOLOGY_FILE")]
    pub file: Option<PathBuf>,

    /// Use only the services listed in the file, not the built-in layout
    #[arg(long, requires = "file")]
    pub file_only: bool,
}
