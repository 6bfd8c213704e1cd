//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod setup;

pub use setup::SetupArgs;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write credential configuration for the relay and front-end
    Setup(SetupArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
///
/// # Returns
/// Result indicating success or failure
pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Setup(args) => setup::handle_setup_command(args),
    }
}
