//! hashguard - secure local file copy CLI

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hashguard_cli::Cli;
use hashguard_cli::cmd;

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout only carries results. Silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_algorithms {
        cmd::list::list()?;
        return Ok(ExitCode::SUCCESS);
    }

    cmd::copy::copy(&cli)
}
