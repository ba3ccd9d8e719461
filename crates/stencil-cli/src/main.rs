//! Stencil CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use stencil_cli::{Cli, CliError, Exit};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let _ = e.print();
            return if e.use_stderr() {
                Exit::Failure.into()
            } else {
                Exit::Success.into()
            };
        }
    };

    match run(&cli) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    stencil_common_log::init(cli.log_config())?;

    let config = cli.load_config()?;
    cli.execute(&config)
}
