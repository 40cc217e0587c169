//! Fixed-width hosts file entries.

use crate::hosts::subnet::parse_ip;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column width of the address field.
pub const IP_WIDTH: usize = 19;
/// Column width of the fully-qualified name field.
pub const FQDN_WIDTH: usize = 81;
/// Column width of the short alias field.
pub const HOSTNAME_WIDTH: usize = 17;

/// A single hosts file line: address, FQDN and short alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostsEntry {
    pub ip: String,
    pub fqdn: String,
    pub hostname: String,
}

impl HostsEntry {
    /// Create an entry without validating anything.
    pub fn new(
        ip: impl Into<String>,
        fqdn: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            fqdn: fqdn.into(),
            hostname: hostname.into(),
        }
    }

    /// Create an entry only if `ip` is a valid address and `hostname` is
    /// not empty.
    pub fn checked(ip: &str, fqdn: String, hostname: &str) -> Option<Self> {
        if hostname.trim().is_empty() {
            tracing::warn!(ip, "Skipping hosts entry with empty hostname");
            return None;
        }
        if parse_ip(ip).is_none() {
            tracing::warn!(ip, hostname, "Skipping hosts entry with invalid IP address");
            return None;
        }
        Some(Self::new(ip, fqdn, hostname))
    }

    /// Render the entry as a fixed-width line.
    pub fn render(&self) -> String {
        format_hosts_entry(&self.ip, &self.fqdn, &self.hostname)
    }
}

impl fmt::Display for HostsEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Left-justify the three fields into 19/81/17 columns. Wider values are
/// not truncated.
pub fn format_hosts_entry(ip: &str, fqdn: &str, hostname: &str) -> String {
    format!(
        "{:<ip_w$}{:<fqdn_w$}{:<host_w$}",
        ip,
        fqdn,
        hostname,
        ip_w = IP_WIDTH,
        fqdn_w = FQDN_WIDTH,
        host_w = HOSTNAME_WIDTH
    )
}
