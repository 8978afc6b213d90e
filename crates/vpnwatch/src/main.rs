mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::{CliError, exit_code};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes. `check` returns
    // its severity ordinal through the Ok branch; everything else maps
    // success to 0 and failures through CliError::exit_code.
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(code);
        }
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Command::Check(args) => Ok(commands::check::handle(args)),

        Command::Record(args) => {
            commands::record::handle(args, &cli.global).map(|()| exit_code::SUCCESS)
        }

        Command::Report(args) => {
            commands::report::handle(args, &cli.global).map(|()| exit_code::SUCCESS)
        }

        Command::Show(args) => {
            commands::show::handle(args, &cli.global).map(|()| exit_code::SUCCESS)
        }

        Command::Config(args) => {
            commands::config_cmd::handle(args, &cli.global).map(|()| exit_code::SUCCESS)
        }

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "vpnwatch", &mut std::io::stdout());
            Ok(exit_code::SUCCESS)
        }
    }
}
