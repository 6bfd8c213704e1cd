//! Setup command handler
//!
//! Collects the upstream API key and model identifier and writes them to
//! `.env` and `.env.local`, where the relay and front-end read them.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;

use mirage_client::config::{ENV_API_KEY, ENV_MODEL_ID};

/// Arguments for `mirage setup`
#[derive(Args)]
pub struct SetupArgs {
    /// Upstream API key; prompted for when absent
    #[arg(long)]
    pub api_key: Option<String>,

    /// Finetuned model identifier; prompted for when absent
    #[arg(long)]
    pub model_id: Option<String>,

    /// Directory the env files are written to
    #[arg(short, long, default_value = ".")]
    pub output: String,
}

/// Handle the setup command
///
/// Prompts for any value not supplied as a flag and refuses to write
/// empty values.
pub fn handle_setup_command(args: SetupArgs) -> Result<()> {
    println!("{}", "Mirage environment setup".bold());
    println!("Stores the credentials the relay forwards to the inference API.");
    println!();

    let api_key = collect(args.api_key, "Enter your BlackForestLabs API key: ")?;
    if api_key.is_empty() {
        bail!("API key is required");
    }

    let model_id = collect(args.model_id, "Enter your model ID: ")?;
    if model_id.is_empty() {
        bail!("Model ID is required");
    }

    write_env_files(Path::new(&args.output), &api_key, &model_id)?;

    println!();
    println!("{}", "✓ Environment setup complete!".green().bold());
    println!(
        "Start the relay with {} to use it.",
        "cargo run -p mirage-relay".cyan()
    );

    Ok(())
}

/// Use the flag value when given; otherwise prompt on stdin
fn collect(flag: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.trim().to_string());
    }

    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;

    Ok(line.trim().to_string())
}

/// Write `.env` and `.env.local` with the collected values
fn write_env_files(output_path: &Path, api_key: &str, model_id: &str) -> Result<()> {
    let content = format!("{ENV_API_KEY}={api_key}\n{ENV_MODEL_ID}={model_id}\n");

    for name in [".env", ".env.local"] {
        let path = output_path.join(name);
        fs::write(&path, &content).with_context(|| format!("Failed to write {:?}", path))?;

        println!("  {} {}", "Created".green(), name);
    }

    Ok(())
}
