//! # figkeep — window holding demo and cache tool
//!
//! Runs the hold loop against simulated windows so its terminal handling
//! can be tried without a plotting library, and inspects the window
//! geometry cache.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod sim;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}

/// Log filter from `RUST_LOG`-style directives; warnings show by default.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
