//! Format-entry command - print one fixed-width hosts entry

use super::CommandContext;
use anyhow::Result;
use clap::Parser;
use sdaf_hosts::hosts::{format_hosts_entry, HostsEntry};

/// Arguments for the format-entry command
#[derive(Parser, Debug, Clone)]
pub struct FormatEntryArgs {
    /// IP address
    pub ip: String,

    /// Fully qualified domain name
    pub fqdn: String,

    /// Short hostname
    pub hostname: String,
}

impl FormatEntryArgs {
    /// Execute the format-entry command
    pub fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        if ctx.output.is_structured() {
            ctx.output
                .structured(&HostsEntry::new(&self.ip, &self.fqdn, &self.hostname))?;
        } else {
            ctx.output
                .lines(&[format_hosts_entry(&self.ip, &self.fqdn, &self.hostname)]);
        }
        Ok(0)
    }
}
