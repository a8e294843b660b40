mod cli;
mod commands;
mod config;
mod error;
mod output;
mod snapshot;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use crate::cli::Command;
use crate::commands::Outcome;
use crate::config::CliConfig;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize tracing
    let filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    debug!(strict_tail = config.strict_tail, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &args.command {
        Command::Check(a) => commands::run_check(a, &config, &mut out),
        Command::Add(a) => commands::run_add(a, &config, &mut out),
        Command::Edit(a) => commands::run_edit(a, &config, &mut out),
        Command::Remove(a) => commands::run_remove(a, &config, &mut out),
        Command::Audit(a) => commands::run_audit(a, &config, &mut out),
        Command::Quote(a) => commands::run_quote(a, &config, &mut out),
    };

    match result {
        Ok(Outcome::Accepted) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::from(2)
        }
    }
}
