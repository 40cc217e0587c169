//! Hosts block generation filters.
//!
//! # Available Filters
//!
//! - `sdaf_generate_sap_hosts`: Generate the managed hosts block as a list of lines
//! - `sdaf_format_hosts_entry`: Format a single fixed-width hosts entry
//!
//! # Examples
//!
//! ```jinja2
//! {{ vars | sdaf_generate_sap_hosts | join('\n') }}
//! {{ vars | sdaf_generate_sap_hosts(inventory_hostname) | join('\n') }}
//! {{ '10.0.1.4' | sdaf_format_hosts_entry('hdbdb0.contoso.com', 'hdbdb0') }}
//! ```

use super::value_to_vars;
use crate::hosts::{format_hosts_entry, HostsGenerator};
use minijinja::{Environment, Error, Value};

/// Register all generation filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("sdaf_generate_sap_hosts", generate_sap_hosts);
    env.add_filter("sdaf_format_hosts_entry", format_entry);
}

/// Generate the managed hosts block.
///
/// # Arguments
///
/// * `vars` - The variable record (`sap_sid`, `ansible_play_hosts`, `hostvars`, ...)
/// * `host` - Optional: the host the block is rendered for. Defaults to
///   `inventory_hostname` from the record; without either no network
///   isolation is applied.
///
/// # Returns
///
/// The block as a list of lines, without trailing newlines.
fn generate_sap_hosts(vars: Value, host: Option<String>) -> Result<Vec<String>, Error> {
    let vars = value_to_vars(&vars)?;
    let generator = HostsGenerator::from_vars(&vars);
    let generator = match host.as_deref() {
        Some(host) if !host.is_empty() => generator.with_viewer(host),
        _ => generator,
    };
    Ok(generator.generate())
}

/// Format a single hosts entry into 19/81/17 character columns.
fn format_entry(ip: String, fqdn: String, hostname: String) -> String {
    format_hosts_entry(&ip, &fqdn, &hostname)
}
