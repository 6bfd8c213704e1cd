//! Mirage CLI
//!
//! Command-line interface for setting up a Mirage deployment.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "mirage")]
#[command(about = "Mirage image generation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    handle_command(cli.command)
}
