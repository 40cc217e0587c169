//! Subcommands module for sdaf-hosts CLI
//!
//! This module contains all the subcommand implementations.

pub mod format;
pub mod generate;
pub mod validate;

use crate::cli::output::OutputFormatter;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use sdaf_hosts::vars::Vars;
use std::path::{Path, PathBuf};

/// Extra variables given after a subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct ExtraVarsArgs {
    /// Extra variables (key=value or @file.yml)
    #[arg(short = 'e', long = "extra-vars", action = clap::ArgAction::Append)]
    pub extra_vars: Vec<String>,
}

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Extra variables
    pub extra_vars: Vec<String>,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let use_color = !cli.no_color && config.colors.enabled;
        let output = OutputFormatter::new(use_color, cli.output, cli.verbosity());

        Self {
            config,
            output,
            extra_vars: cli.all_extra_vars(),
        }
    }

    /// Resolve the variables file: the command line wins over the
    /// configured default.
    pub fn vars_file(&self, explicit: Option<&PathBuf>) -> Result<PathBuf> {
        explicit
            .or(self.config.defaults.vars_file.as_ref())
            .cloned()
            .context("No variables file given and none configured (set SDAF_HOSTS_VARS)")
    }

    /// Load the variables file and apply extra variables on top.
    pub fn load_vars(&self, path: &Path) -> Result<Vars> {
        self.output
            .info(&format!("Loading variables from {}", path.display()));

        let mut vars = Vars::from_file(path)?;
        for expr in &self.extra_vars {
            vars.apply_extra_var(expr)
                .with_context(|| format!("Failed to apply extra variable '{}'", expr))?;
        }

        tracing::debug!(count = vars.len(), "Loaded variables");
        Ok(vars)
    }
}
