//! Entry point for the `pydelta` CLI. Parses arguments, sets up logging,
//! dispatches to the command handler, and maps errors to exit codes.

use pydelta::cli::Cli;
use pydelta::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
