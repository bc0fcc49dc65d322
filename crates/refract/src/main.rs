//! Refract CLI - Validate, resize and re-encode images into responsive variants.
//!
//! Refract reads an image file, applies the same pipeline a web host would run
//! on an upload, and writes the resulting artifacts next to it. Data goes to
//! stdout as JSON; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Describe an image
//! refract inspect photo.jpg
//!
//! # Check it against the upload policy (exit status 1 when rejected)
//! refract validate photo.jpg
//!
//! # Fit inside 1024x1024 and let refract pick jpeg/webp
//! refract process photo.png --max-width 1024 --max-height 1024 --auto-format -o out/
//!
//! # Write the configured responsive set, or custom sizes
//! refract responsive photo.jpg --size hero=1600x900 --size thumb=200x200 -o variants/
//!
//! # View configuration
//! refract config show
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// Refract - Validate, resize and re-encode images into responsive variants.
#[derive(Parser, Debug)]
#[command(name = "refract")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "REFRACT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print image metadata as JSON
    Inspect(cli::inspect::InspectArgs),

    /// Check an image against the upload policy
    Validate(cli::validate::ValidateArgs),

    /// Resize and re-encode a single image
    Process(cli::process::ProcessArgs),

    /// Generate a set of named size variants
    Responsive(cli::responsive::ResponsiveArgs),

    /// Generate a storage-safe name for an upload
    Filename(cli::filename::FilenameArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

/// Load the explicit config file, or the platform default.
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<refract_core::Config> {
    match path {
        Some(path) => refract_core::Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(refract_core::Config::load()?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().map(cli::expand_path);

    // An explicit --config must load, except for `config` itself (which may be
    // about to create it). Logging isn't initialized yet, so use eprintln.
    let managing_config = matches!(cli.command, Commands::Config(_));
    let config = match load_config(config_path.as_ref()) {
        Ok(config) => config,
        Err(e) if config_path.is_some() && !managing_config => return Err(e),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `refract config path`."
            );
            refract_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Refract v{}", refract_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Inspect(args) => cli::inspect::execute(args).await,
        Commands::Validate(args) => cli::validate::execute(args, config).await,
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Responsive(args) => cli::responsive::execute(args, config).await,
        Commands::Filename(args) => cli::filename::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config, config_path).await,
    }
}
