//! `cade-config` CLI entry point.

use clap::Parser;

use cade_config::cli::{commands, handle_error, Cli, Commands};
use cade_config::infrastructure::logging::{LogConfig, LoggerImpl, SecretScrubber};

fn main() {
    let cli = Cli::parse();

    let logger = match LoggerImpl::init(&LogConfig::from(&cli.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(&err, &SecretScrubber::new(), cli.json),
    };
    let scrubber = logger.scrubber();

    let result = match cli.command {
        Commands::Check => commands::check::execute(&cli.sources, scrubber, cli.json),
        Commands::Show { ref group } => {
            commands::show::execute(&cli.sources, group.as_deref(), scrubber, cli.json)
        }
        Commands::Schema => commands::schema::execute(cli.json),
        Commands::Template { ref output } => commands::template::execute(output.as_deref()),
        Commands::Topology(command) => {
            commands::topology::execute(command, &cli.sources, scrubber, cli.json)
        }
    };

    if let Err(err) = result {
        handle_error(&err, scrubber, cli.json);
    }
}
