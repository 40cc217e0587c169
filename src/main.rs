//! sdaf-hosts - SAP hosts file generator
//!
//! This is the main entry point for the sdaf-hosts CLI.

mod cli;
mod config;

use anyhow::Result;
use cli::commands::CommandContext;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        Config::default()
    });

    // Initialize logging based on verbosity
    init_logging(cli.verbosity(), config.logging.level.as_deref());

    tracing::debug!(version = sdaf_hosts::version(), "Starting sdaf-hosts");

    // Create command context
    let mut ctx = CommandContext::new(&cli, config);

    // Execute the appropriate command
    let result = match &cli.command {
        Commands::Generate(args) => args.execute(&mut ctx),
        Commands::ValidateNetwork(args) => args.execute(&mut ctx),
        Commands::ValidateStage(args) => args.execute(&mut ctx),
        Commands::FormatEntry(args) => args.execute(&mut ctx),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            2
        }
    };

    std::process::exit(exit_code);
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins over
/// everything, then `-v`, then the configured level.
fn init_logging(verbosity: u8, configured: Option<&str>) {
    let filter = match (verbosity, configured) {
        (0, Some(level)) => level,
        (0, None) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity >= 3),
        )
        .with(env_filter)
        .init();
}
