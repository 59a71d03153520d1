use std::path::PathBuf;

use cade_config::cli::{Cli, Commands, TopologyCommands};
use cade_config::infrastructure::logging::{LogConfig, LogFormat};
use clap::Parser;

#[test]
fn test_parse_check_with_sources() {
    let cli = Cli::try_parse_from([
        "cade-config",
        "check",
        "--env-file",
        ".env",
        "--secrets-dir",
        "/var/run/secrets/cade",
        "--env-prefix",
        "CADE_",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Check));
    assert_eq!(cli.sources.env_file, Some(PathBuf::from(".env")));
    assert_eq!(
        cli.sources.secrets_dir,
        Some(PathBuf::from("/var/run/secrets/cade"))
    );
    assert_eq!(cli.sources.env_prefix.as_deref(), Some("CADE_"));
    assert!(!cli.json);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["cade-config", "show", "--group", "Database", "--json"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Show { group } => assert_eq!(group.as_deref(), Some("Database")),
        other => panic!("Expected Show, got {other:?}"),
    }
}

#[test]
fn test_log_flags_build_log_config() {
    let cli = Cli::try_parse_from([
        "cade-config",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "schema",
    ])
    .unwrap();

    let config = LogConfig::from(&cli.logging);
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.log_dir.is_none());
}

#[test]
fn test_env_fallback_for_secrets_file() {
    temp_env::with_vars(
        [
            ("CADE_SECRETS_FILE", Some("/run/secrets/cade.env")),
            ("CADE_LOG_LEVEL", None::<&str>),
        ],
        || {
            let cli = Cli::try_parse_from(["cade-config", "check"]).unwrap();
            assert_eq!(
                cli.sources.secrets_file,
                Some(PathBuf::from("/run/secrets/cade.env"))
            );
            assert_eq!(cli.logging.log_level, "warn");
        },
    );
}

#[test]
fn test_parse_topology_render() {
    let cli = Cli::try_parse_from([
        "cade-config",
        "topology",
        "render",
        "--file",
        "deploy/topology.yaml",
        "--file-only",
        "--with-config-map",
    ])
    .unwrap();

    match cli.command {
        Commands::Topology(TopologyCommands::Render {
            input,
            with_config_map,
        }) => {
            assert_eq!(input.file, Some(PathBuf::from("deploy/topology.yaml")));
            assert!(input.file_only);
            assert!(with_config_map);
        }
        other => panic!("Expected topology render, got {other:?}"),
    }
}

#[test]
fn test_file_only_requires_file() {
    temp_env::with_var_unset("CADE_TOPOLOGY_FILE", || {
        assert!(Cli::try_parse_from(["cade-config", "topology", "validate", "--file-only"]).is_err());
    });
}

#[test]
fn test_template_output_path() {
    let cli = Cli::try_parse_from(["cade-config", "template", "-o", ".env.example"]).unwrap();
    match cli.command {
        Commands::Template { output } => {
            assert_eq!(output, Some(PathBuf::from(".env.example")));
        }
        other => panic!("Expected Template, got {other:?}"),
    }
}

#[test]
fn test_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["cade-config", "deploy"]).is_err());
}
