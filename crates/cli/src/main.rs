//! Treesum CLI - treesum command

use clap::Parser;
use cli_lib::{logging, Cli, Settings, UsageError};
use std::process::ExitCode;
use treesum_core::StderrSink;

fn main() -> ExitCode {
    let settings = Settings::from_cli(Cli::parse());

    if let Err(e) = logging::init(&settings) {
        eprintln!("error: {:#}", e);
        return ExitCode::from(2);
    }

    let mut sink = StderrSink::new();
    match cli_lib::run(&settings, std::io::stdout().lock(), &mut sink) {
        Ok(summary) => summary.exit_code(settings.strict),
        Err(e) if e.is::<UsageError>() => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
