//! CLI command definitions and dispatch.

pub mod geometry;
pub mod hold;

use clap::{Parser, Subcommand};

/// figkeep — keep plot windows alive from the terminal.
#[derive(Parser, Debug)]
#[command(name = "figkeep", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open simulated windows and hold them until a key press or close.
    Hold(hold::HoldArgs),
    /// Inspect or edit the window geometry cache.
    Geometry(geometry::GeometryArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Hold(args) => hold::execute(args),
        Command::Geometry(args) => geometry::execute(args),
    }
}
