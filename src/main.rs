mod cli;
mod config;
mod error;
mod format;
mod net;
mod parse;
mod report;

use clap::Parser;
use config::Options;
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: cli::Cli) -> Result<String, error::Error> {
    let opts = Options::from(&args);
    tracing::debug!(?opts, "options");

    match args.command {
        Some(cli::Command::Subnet { prefix, n }) => report::subnets(&prefix, &n, &opts),
        None => report::details(&args.prefixes, &opts),
    }
}

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    init_tracing();

    match run(args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
