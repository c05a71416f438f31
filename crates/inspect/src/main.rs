//! Inspection tool for tile passage and layering.
//!
//! Loads a RON map plus optional TOML settings and prints what the classifier
//! decides. Run with: `tile-inspect <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Layers, Passage, Probe};

/// Inspect tile passage and layering decisions
#[derive(Parser)]
#[command(name = "tile-inspect")]
#[command(about = "Inspect wall-aware passage and tile layering", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print a passability grid (`.` passable, `#` blocked)
    Passage(Passage),

    /// Print a layering grid (`^` above characters, `_` below)
    Layers(Layers),

    /// Explain the decision for one cell
    Probe(Probe),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Passage(cmd) => cmd.execute(),
        Command::Layers(cmd) => cmd.execute(),
        Command::Probe(cmd) => cmd.execute(),
    }
}
