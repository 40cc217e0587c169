//! Generate command - render the managed hosts block
//!
//! This module implements the `generate` subcommand.

use super::{CommandContext, ExtraVarsArgs};
use anyhow::Result;
use clap::Parser;
use sdaf_hosts::hosts::{HostsGenerator, IsolationMode};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the generate command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Variables file (YAML or JSON)
    pub vars_file: Option<PathBuf>,

    /// Host to render the block for (overrides inventory_hostname)
    #[arg(long = "host", short = 'H')]
    pub host: Option<String>,

    #[command(flatten)]
    pub extra: ExtraVarsArgs,
}

/// Structured output of the generate command
#[derive(Debug, Serialize)]
struct GenerateReport<'a> {
    sid: &'a str,
    host: Option<&'a str>,
    isolation: Option<IsolationMode>,
    lines: &'a [String],
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        let path = ctx.vars_file(self.vars_file.as_ref())?;
        let vars = ctx.load_vars(&path)?;

        let mut generator = HostsGenerator::from_vars(&vars);
        if let Some(host) = self.host.as_ref().or(ctx.config.defaults.host.as_ref()) {
            generator = generator.with_viewer(host);
        }

        if let Some(viewer) = generator.viewer() {
            ctx.output
                .info(&format!("Rendering hosts block for {}", viewer.hostname));
        }

        let lines = generator.generate();

        if ctx.output.is_structured() {
            ctx.output.structured(&GenerateReport {
                sid: &generator.deployment().sap_sid,
                host: generator.viewer().map(|v| v.hostname.as_str()),
                isolation: generator.isolation(),
                lines: &lines,
            })?;
        } else {
            ctx.output.lines(&lines);
        }

        Ok(0)
    }
}
