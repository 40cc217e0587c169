//! Validation commands
//!
//! This module implements the `validate-network` and `validate-stage`
//! subcommands. Both exit with status 1 when the configuration is invalid.

use super::{CommandContext, ExtraVarsArgs};
use anyhow::{Context, Result};
use clap::Parser;
use sdaf_hosts::hosts::{validate_network_vars, validate_stage_vars, DeploymentStage};
use std::path::PathBuf;

/// Arguments for the validate-network command
#[derive(Parser, Debug, Clone)]
pub struct ValidateNetworkArgs {
    /// Variables file (YAML or JSON)
    pub vars_file: Option<PathBuf>,

    #[command(flatten)]
    pub extra: ExtraVarsArgs,
}

/// Arguments for the validate-stage command
#[derive(Parser, Debug, Clone)]
pub struct ValidateStageArgs {
    /// Variables file (YAML or JSON)
    pub vars_file: Option<PathBuf>,

    /// Deployment stage: pre_cluster, post_cluster or production
    #[arg(long, short = 's')]
    pub stage: Option<String>,

    #[command(flatten)]
    pub extra: ExtraVarsArgs,
}

/// Print the messages of a validation result and return the exit code.
fn report(
    ctx: &CommandContext,
    valid: bool,
    errors: &[String],
    warnings: &[String],
    what: &str,
) -> i32 {
    for error in errors {
        ctx.output.error(error);
    }
    for warning in warnings {
        ctx.output.warning(warning);
    }

    if valid {
        ctx.output.status(true, &format!("{} is valid", what));
        0
    } else {
        ctx.output.status(
            false,
            &format!("{} is invalid ({} error(s))", what, errors.len()),
        );
        1
    }
}

impl ValidateNetworkArgs {
    /// Execute the validate-network command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let path = ctx.vars_file(self.vars_file.as_ref())?;
        let vars = ctx.load_vars(&path)?;
        let result = validate_network_vars(&vars);

        if ctx.output.is_structured() {
            ctx.output.structured(&result)?;
            return Ok(if result.valid { 0 } else { 1 });
        }

        ctx.output.section("Network configuration");
        Ok(report(
            ctx,
            result.valid,
            &result.errors,
            &result.warnings,
            "Network configuration",
        ))
    }
}

impl ValidateStageArgs {
    /// Execute the validate-stage command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let stage = match self.stage.as_ref().or(ctx.config.defaults.stage.as_ref()) {
            Some(name) => name
                .parse::<DeploymentStage>()
                .with_context(|| format!("Invalid --stage value '{}'", name))?,
            None => DeploymentStage::default(),
        };

        let path = ctx.vars_file(self.vars_file.as_ref())?;
        let vars = ctx.load_vars(&path)?;
        let result = validate_stage_vars(&vars, stage);

        if ctx.output.is_structured() {
            ctx.output.structured(&result)?;
            return Ok(if result.valid { 0 } else { 1 });
        }

        ctx.output.section(&format!("Deployment stage: {}", stage));
        Ok(report(
            ctx,
            result.valid,
            &result.errors,
            &result.warnings,
            "Deployment configuration",
        ))
    }
}
