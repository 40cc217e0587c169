//! CLI module for sdaf-hosts
//!
//! This module provides the command-line interface, including argument
//! parsing and subcommand handling.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// sdaf-hosts - SAP hosts file generator
///
/// Generates the /etc/hosts block for SAP landscapes deployed with the
/// SAP Deployment Automation Framework.
#[derive(Parser, Debug, Clone)]
#[command(name = "sdaf-hosts")]
#[command(author = "SDAF Hosts Contributors")]
#[command(version)]
#[command(about = "Generate /etc/hosts entries for SAP landscapes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Extra variables (key=value or @file.yml)
    #[arg(short = 'e', long = "extra-vars", action = clap::ArgAction::Append)]
    pub extra_vars: Vec<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "SDAF_HOSTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
    /// YAML output
    Yaml,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the managed hosts block
    Generate(commands::generate::GenerateArgs),

    /// Validate subnet CIDRs and report overlaps
    #[command(name = "validate-network")]
    ValidateNetwork(commands::validate::ValidateNetworkArgs),

    /// Validate load balancer settings for a deployment stage
    #[command(name = "validate-stage")]
    ValidateStage(commands::validate::ValidateStageArgs),

    /// Format a single hosts entry
    #[command(name = "format-entry")]
    FormatEntry(commands::format::FormatEntryArgs),
}

impl Commands {
    /// Extra variables given after the subcommand.
    fn extra_vars(&self) -> &[String] {
        match self {
            Commands::Generate(args) => &args.extra.extra_vars,
            Commands::ValidateNetwork(args) => &args.extra.extra_vars,
            Commands::ValidateStage(args) => &args.extra.extra_vars,
            Commands::FormatEntry(_) => &[],
        }
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Extra variables from before and after the subcommand, in command
    /// line order.
    pub fn all_extra_vars(&self) -> Vec<String> {
        self.extra_vars
            .iter()
            .chain(self.command.extra_vars())
            .cloned()
            .collect()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }
}
