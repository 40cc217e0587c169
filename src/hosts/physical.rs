//! Physical host entries and client-subnet network isolation.
//!
//! Every play host gets one entry for its primary address plus optional
//! custom virtual hostnames for its application tiers. In scale-out HANA
//! landscapes the secondary addresses of database hosts are published with
//! a subnet-specific suffix (`-hsr`, `-hana`, `-inter`, `-storage`).
//!
//! # Network isolation
//!
//! Hosts that are not HANA nodes should only see HANA addresses on the
//! client subnet. When the hosts file is rendered for such a host in a
//! scale-out landscape, each HANA target is shown with its first client
//! subnet address as primary, and only its client subnet secondaries are
//! candidates for suffixed entries.

use crate::hosts::config::{CustomHostnames, DeploymentConfig, NetworkConfig, VirtualRole};
use crate::hosts::entry::HostsEntry;
use crate::hosts::subnet::{Membership, SubnetKind};
use crate::vars::{self, Vars};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Tier tag carried by HANA database hosts.
pub const HANA_TIER: &str = "hana";

/// A play host with its addresses and tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub hostname: String,
    /// Addresses in caller order; the first one is the primary address
    pub ips: Vec<String>,
    /// Supported tiers in order of first appearance
    pub tiers: Vec<String>,
    /// Per-host custom virtual hostnames
    pub custom: CustomHostnames,
}

impl HostRecord {
    /// Build a record from a host's entry in `hostvars`.
    pub fn from_hostvars(hostname: &str, host_vars: &JsonValue) -> Self {
        let host_vars = Vars::from_json(host_vars.clone()).unwrap_or_default();

        let ips = host_vars
            .get("ipadd")
            .map(vars::to_string_list)
            .unwrap_or_default();

        let mut tiers: Vec<String> = Vec::new();
        for tier in host_vars
            .get("supported_tiers")
            .map(vars::to_string_list)
            .unwrap_or_default()
        {
            if !tiers.contains(&tier) {
                tiers.push(tier);
            }
        }

        Self {
            hostname: hostname.to_string(),
            ips,
            tiers,
            custom: CustomHostnames::from_vars(&host_vars),
        }
    }

    /// Whether the host carries the `hana` tier.
    pub fn is_hana(&self) -> bool {
        self.has_tier(HANA_TIER)
    }

    /// Whether the host carries a tier.
    pub fn has_tier(&self, tier: &str) -> bool {
        self.tiers.iter().any(|t| t == tier)
    }
}

/// The play hosts known to `hostvars`, ordered by hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Length of `ansible_play_hosts`, as reported in the header
    pub play_host_count: usize,
    hosts: BTreeMap<String, HostRecord>,
}

impl Inventory {
    /// Collect the play hosts from `ansible_play_hosts` and `hostvars`.
    /// Play hosts without host variables are left out.
    pub fn from_vars(vars: &Vars) -> Self {
        use crate::hosts::config::rules;

        let play_hosts = vars
            .lookup(&rules::PLAY_HOSTS)
            .map(vars::to_string_list)
            .unwrap_or_default();
        let hostvars = vars.lookup(&rules::HOSTVARS).and_then(JsonValue::as_object);

        let mut hosts = BTreeMap::new();
        for hostname in &play_hosts {
            match hostvars.and_then(|hv| hv.get(hostname)) {
                Some(host_vars) => {
                    hosts.insert(hostname.clone(), HostRecord::from_hostvars(hostname, host_vars));
                }
                None => debug!(host = %hostname, "Play host has no hostvars, skipping"),
            }
        }

        Self {
            play_host_count: play_hosts.len(),
            hosts,
        }
    }

    /// Build an inventory from records directly.
    pub fn from_records(records: impl IntoIterator<Item = HostRecord>) -> Self {
        let hosts: BTreeMap<String, HostRecord> = records
            .into_iter()
            .map(|r| (r.hostname.clone(), r))
            .collect();
        Self {
            play_host_count: hosts.len(),
            hosts,
        }
    }

    /// Look up a host.
    pub fn get(&self, hostname: &str) -> Option<&HostRecord> {
        self.hosts.get(hostname)
    }

    /// Hosts in lexicographic hostname order.
    pub fn hosts(&self) -> impl Iterator<Item = &HostRecord> {
        self.hosts.values()
    }

    /// Number of hosts with host variables.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether no host has host variables.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// The host a hosts file is rendered for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub hostname: String,
    pub is_hana: bool,
}

impl Viewer {
    /// Resolve a viewer against the inventory. Hosts missing from the
    /// inventory are treated as non-HANA hosts.
    pub fn resolve(hostname: &str, inventory: &Inventory) -> Self {
        Self {
            hostname: hostname.to_string(),
            is_hana: inventory.get(hostname).is_some_and(HostRecord::is_hana),
        }
    }
}

/// How HANA targets are presented to the viewing host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationMode {
    /// Viewer is not a HANA host: HANA targets are restricted to the client subnet
    Filtered,
    /// Viewer is a HANA host: every address is shown
    Full,
}

impl IsolationMode {
    /// Isolation only exists for scale-out landscapes rendered for a known host.
    pub fn for_viewer(config: &DeploymentConfig, viewer: Option<&Viewer>) -> Option<Self> {
        if !config.scale_out {
            return None;
        }
        viewer.map(|v| if v.is_hana { Self::Full } else { Self::Filtered })
    }

    /// Whether a target host is subject to client-subnet filtering.
    pub fn filters(self, target: &HostRecord) -> bool {
        self == Self::Filtered && target.is_hana()
    }
}

/// Addresses of a host as presented to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayedAddresses<'a> {
    primary: &'a str,
    secondaries: Vec<&'a str>,
}

fn displayed_addresses<'a>(
    host: &'a HostRecord,
    network: &NetworkConfig,
    filtered: bool,
) -> Option<DisplayedAddresses<'a>> {
    let (first, rest) = host.ips.split_first()?;

    if !filtered {
        return Some(DisplayedAddresses {
            primary: first,
            secondaries: rest.iter().map(String::as_str).collect(),
        });
    }

    let primary = host
        .ips
        .iter()
        .find(|ip| network.contains(SubnetKind::Client, ip))
        .map_or(first.as_str(), String::as_str);

    let secondaries = rest
        .iter()
        .map(String::as_str)
        .filter(|ip| network.contains(SubnetKind::Client, ip))
        .collect();

    Some(DisplayedAddresses { primary, secondaries })
}

/// Suffix for a scale-out secondary address, chosen by subnet. The
/// database subnet is checked before the storage subnet; addresses in
/// neither get no entry.
pub fn scale_out_suffix(
    ip: &str,
    config: &DeploymentConfig,
    network: &NetworkConfig,
) -> Option<&'static str> {
    let ha = config.db_high_availability;

    let db = network.membership(SubnetKind::Database, ip);
    trace!(ip, ?db, "database subnet check");
    if db == Membership::Member {
        return Some(if ha { "-hsr" } else { "-hana" });
    }

    let storage = network.membership(SubnetKind::Storage, ip);
    trace!(ip, ?storage, "storage subnet check");
    if storage == Membership::Member {
        return Some(if ha { "-inter" } else { "-storage" });
    }

    None
}

/// Entries for a single host.
pub fn host_entries(
    host: &HostRecord,
    config: &DeploymentConfig,
    network: &NetworkConfig,
    isolation: Option<IsolationMode>,
) -> Vec<HostsEntry> {
    let filtered = isolation.is_some_and(|mode| mode.filters(host));
    let Some(addresses) = displayed_addresses(host, network, filtered) else {
        debug!(host = %host.hostname, "Host has no IP addresses, skipping");
        return Vec::new();
    };

    let Some(primary) = HostsEntry::checked(
        addresses.primary,
        config.qualify(&host.hostname),
        &host.hostname,
    ) else {
        return Vec::new();
    };

    let mut entries = vec![primary];

    for role in host.tiers.iter().filter_map(|t| VirtualRole::for_tier(t)) {
        let custom = config.custom.get(role).or_else(|| host.custom.get(role));
        if let Some(name) = custom {
            entries.push(HostsEntry::new(addresses.primary, config.qualify(name), name));
        }
    }

    if config.scale_out && host.is_hana() {
        for ip in addresses.secondaries {
            let Some(suffix) = scale_out_suffix(ip, config, network) else {
                continue;
            };
            let name = format!("{}{}", host.hostname, suffix);
            entries.push(HostsEntry::new(ip, config.qualify(&name), name));
        }
    }

    debug!(
        host = %host.hostname,
        entries = entries.len(),
        filtered,
        "Generated host entries"
    );
    entries
}

/// Entries for every host in the inventory, in hostname order.
pub fn physical_host_entries(
    inventory: &Inventory,
    config: &DeploymentConfig,
    network: &NetworkConfig,
    isolation: Option<IsolationMode>,
) -> Vec<HostsEntry> {
    inventory
        .hosts()
        .flat_map(|host| host_entries(host, config, network, isolation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn host(name: &str, ips: &[&str], tiers: &[&str]) -> HostRecord {
        HostRecord {
            hostname: name.to_string(),
            ips: ips.iter().map(|s| s.to_string()).collect(),
            tiers: tiers.iter().map(|s| s.to_string()).collect(),
            custom: CustomHostnames::default(),
        }
    }

    fn scale_out_config(ha: bool) -> DeploymentConfig {
        DeploymentConfig {
            sap_fqdn: "contoso.com".to_string(),
            scale_out: true,
            db_high_availability: ha,
            ..DeploymentConfig::default()
        }
    }

    fn network() -> NetworkConfig {
        NetworkConfig {
            subnet_cidr_db: Some("10.0.1.0/24".to_string()),
            subnet_cidr_storage: Some("10.0.2.0/24".to_string()),
            subnet_cidr_client: Some("10.0.3.0/24".to_string()),
        }
    }

    fn hostnames(entries: &[HostsEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.hostname.as_str()).collect()
    }

    #[test]
    fn test_from_hostvars() {
        let record = HostRecord::from_hostvars(
            "db0",
            &json!({
                "ipadd": ["10.0.1.4", "10.0.2.4"],
                "supported_tiers": ["hana", "hana", "scs"],
                "custom_pas_virtual_hostname": "pasvh"
            }),
        );
        assert_eq!(record.ips, vec!["10.0.1.4", "10.0.2.4"]);
        assert_eq!(record.tiers, vec!["hana", "scs"]);
        assert!(record.is_hana());
        assert_eq!(record.custom.get(VirtualRole::Pas), Some("pasvh"));
    }

    #[test]
    fn test_suffixes_by_subnet() {
        let net = network();
        let ha = scale_out_config(true);
        let non_ha = scale_out_config(false);
        assert_eq!(scale_out_suffix("10.0.1.5", &ha, &net), Some("-hsr"));
        assert_eq!(scale_out_suffix("10.0.1.5", &non_ha, &net), Some("-hana"));
        assert_eq!(scale_out_suffix("10.0.2.5", &ha, &net), Some("-inter"));
        assert_eq!(scale_out_suffix("10.0.2.5", &non_ha, &net), Some("-storage"));
        assert_eq!(scale_out_suffix("10.0.9.5", &ha, &net), None);
        assert_eq!(scale_out_suffix("bogus", &ha, &net), None);
    }

    #[test]
    fn test_db_subnet_checked_before_storage() {
        let net = NetworkConfig {
            subnet_cidr_db: Some("10.0.0.0/16".to_string()),
            subnet_cidr_storage: Some("10.0.2.0/24".to_string()),
            subnet_cidr_client: None,
        };
        assert_eq!(scale_out_suffix("10.0.2.5", &scale_out_config(false), &net), Some("-hana"));
    }

    #[test]
    fn test_invalid_db_cidr_falls_through_to_storage() {
        let net = NetworkConfig {
            subnet_cidr_db: Some("10.0.1.0/99".to_string()),
            subnet_cidr_storage: Some("10.0.1.0/24".to_string()),
            subnet_cidr_client: None,
        };
        assert_eq!(scale_out_suffix("10.0.1.5", &scale_out_config(true), &net), Some("-inter"));
    }

    #[test]
    fn test_scale_out_secondaries() {
        let h = host("db0", &["10.0.3.4", "10.0.1.4", "10.0.2.4", "10.0.9.4"], &["hana"]);
        let entries = host_entries(&h, &scale_out_config(true), &network(), None);
        assert_eq!(hostnames(&entries), vec!["db0", "db0-hsr", "db0-inter"]);
        assert_eq!(entries[1].ip, "10.0.1.4");
        assert_eq!(entries[1].fqdn, "db0-hsr.contoso.com");
    }

    #[test]
    fn test_no_secondaries_without_scale_out() {
        let h = host("db0", &["10.0.3.4", "10.0.1.4"], &["hana"]);
        let config = DeploymentConfig {
            scale_out: false,
            ..scale_out_config(true)
        };
        let entries = host_entries(&h, &config, &network(), None);
        assert_eq!(hostnames(&entries), vec!["db0"]);
    }

    #[test]
    fn test_no_secondaries_for_non_hana_host() {
        let h = host("app0", &["10.0.3.10", "10.0.1.10"], &["app"]);
        let entries = host_entries(&h, &scale_out_config(false), &network(), None);
        assert_eq!(hostnames(&entries), vec!["app0"]);
    }

    #[test]
    fn test_filtered_view_uses_client_address() {
        let h = host("db0", &["10.0.1.4", "10.0.3.4", "10.0.3.5", "10.0.2.4"], &["hana"]);
        let entries = host_entries(
            &h,
            &scale_out_config(false),
            &network(),
            Some(IsolationMode::Filtered),
        );
        // client secondaries fall in neither DB nor storage subnet
        assert_eq!(hostnames(&entries), vec!["db0"]);
        assert_eq!(entries[0].ip, "10.0.3.4");
    }

    #[test]
    fn test_filtered_view_falls_back_to_first_ip() {
        let h = host("db0", &["10.0.1.4", "10.0.2.4"], &["hana"]);
        let entries = host_entries(
            &h,
            &scale_out_config(true),
            &network(),
            Some(IsolationMode::Filtered),
        );
        assert_eq!(hostnames(&entries), vec!["db0"]);
        assert_eq!(entries[0].ip, "10.0.1.4");
    }

    #[test]
    fn test_filtered_view_keeps_client_secondaries_in_known_subnets() {
        // client and DB ranges overlap here, so a client secondary can carry a suffix
        let net = NetworkConfig {
            subnet_cidr_db: Some("10.0.1.0/24".to_string()),
            subnet_cidr_storage: None,
            subnet_cidr_client: Some("10.0.0.0/16".to_string()),
        };
        let h = host("db0", &["192.168.0.4", "10.0.1.4", "172.16.0.4"], &["hana"]);
        let entries = host_entries(
            &h,
            &scale_out_config(true),
            &net,
            Some(IsolationMode::Filtered),
        );
        assert_eq!(hostnames(&entries), vec!["db0", "db0-hsr"]);
        assert_eq!(entries[0].ip, "10.0.1.4");
    }

    #[test]
    fn test_full_view_is_unfiltered() {
        let h = host("db0", &["10.0.1.4", "10.0.3.4", "10.0.2.4"], &["hana"]);
        let entries = host_entries(
            &h,
            &scale_out_config(true),
            &network(),
            Some(IsolationMode::Full),
        );
        assert_eq!(entries[0].ip, "10.0.1.4");
        assert_eq!(hostnames(&entries), vec!["db0", "db0-inter"]);
    }

    #[test]
    fn test_filtered_mode_ignores_non_hana_targets() {
        let h = host("app0", &["10.0.1.10", "10.0.3.10"], &["app"]);
        let entries = host_entries(
            &h,
            &scale_out_config(true),
            &network(),
            Some(IsolationMode::Filtered),
        );
        assert_eq!(entries[0].ip, "10.0.1.10");
    }

    #[test]
    fn test_custom_tier_hostnames() {
        let mut h = host("app0", &["10.0.3.10"], &["pas", "app", "web"]);
        h.custom.app = Some("host-app".to_string());
        h.custom.web = Some("host-web".to_string());
        let mut config = scale_out_config(false);
        config.custom.pas = Some("run-pas".to_string());
        config.custom.web = Some("run-web".to_string());

        let entries = host_entries(&h, &config, &network(), None);
        assert_eq!(hostnames(&entries), vec!["app0", "run-pas", "host-app", "run-web"]);
        assert!(entries.iter().all(|e| e.ip == "10.0.3.10"));
        assert_eq!(entries[1].fqdn, "run-pas.contoso.com");
    }

    #[test]
    fn test_empty_ips_and_invalid_primary() {
        let config = scale_out_config(false);
        assert!(host_entries(&host("a", &[], &["hana"]), &config, &network(), None).is_empty());
        assert!(
            host_entries(&host("b", &["nope"], &["app"]), &config, &network(), None).is_empty()
        );
    }

    #[test]
    fn test_isolation_mode() {
        let viewer_app = Viewer { hostname: "app0".into(), is_hana: false };
        let viewer_db = Viewer { hostname: "db0".into(), is_hana: true };
        let so = scale_out_config(false);
        let su = DeploymentConfig::default();

        assert_eq!(
            IsolationMode::for_viewer(&so, Some(&viewer_app)),
            Some(IsolationMode::Filtered)
        );
        assert_eq!(
            IsolationMode::for_viewer(&so, Some(&viewer_db)),
            Some(IsolationMode::Full)
        );
        assert_eq!(IsolationMode::for_viewer(&so, None), None);
        assert_eq!(IsolationMode::for_viewer(&su, Some(&viewer_app)), None);
    }

    #[test]
    fn test_inventory_skips_hosts_without_hostvars() {
        let vars = Vars::from_json(json!({
            "ansible_play_hosts": ["zeta", "alpha", "ghost"],
            "hostvars": {
                "zeta": { "ipadd": ["10.0.0.2"] },
                "alpha": { "ipadd": ["10.0.0.1"] }
            }
        }))
        .unwrap();
        let inventory = Inventory::from_vars(&vars);
        assert_eq!(inventory.play_host_count, 3);
        let names: Vec<&str> = inventory.hosts().map(|h| h.hostname.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
