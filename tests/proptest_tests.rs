//! Property-based tests for sdaf-hosts using proptest.
//!
//! These properties hold for any landscape: physical entries are ordered
//! by hostname regardless of input order, suffixed names only appear in
//! scale-out landscapes, and generation never panics on malformed input.

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use sdaf_hosts::hosts::{format_hosts_entry, generate_sap_hosts, HostsGenerator};
use sdaf_hosts::vars::Vars;
use serde_json::{json, Value};
use std::collections::BTreeMap;

// ============================================================================
// Strategies for generating test data
// ============================================================================

/// Strategy for generating valid host names
fn valid_hostname() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9]{0,11}").unwrap()
}

/// Strategy for generating addresses in the 10.0.0.0/16 range
fn address() -> impl Strategy<Value = String> {
    (0u8..4, 1u8..=254).prop_map(|(subnet, host)| format!("10.0.{}.{}", subnet, host))
}

/// Strategy for generating potentially malformed addresses
fn any_address() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => address(),
        1 => "[0-9.:a-f]{0,20}",
        1 => Just(String::new()),
    ]
}

/// Strategy for a host's variables
fn host_vars(ips: impl Strategy<Value = String>) -> impl Strategy<Value = Value> {
    (
        vec(ips, 0..4),
        prop::sample::subsequence(vec!["hana", "scs", "pas", "app", "web"], 0..3),
    )
        .prop_map(|(ips, tiers)| json!({ "ipadd": ips, "supported_tiers": tiers }))
}

fn landscape(hosts: &BTreeMap<String, Value>, order: &[String], scale_out: bool) -> Vars {
    Vars::from_json(json!({
        "sap_sid": "X00",
        "sap_fqdn": "contoso.com",
        "database_scale_out": scale_out,
        "database_high_availability": true,
        "subnet_cidr_db": "10.0.1.0/24",
        "subnet_cidr_storage": "10.0.2.0/24",
        "subnet_cidr_client": "10.0.3.0/24",
        "ansible_play_hosts": order,
        "hostvars": hosts,
    }))
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_independent_of_play_host_order(
        hosts in btree_map(valid_hostname(), host_vars(address()), 1..6),
        seed in any::<u64>(),
    ) {
        let sorted: Vec<String> = hosts.keys().cloned().collect();
        let mut shuffled = sorted.clone();
        // deterministic rotation driven by the seed
        let shift = (seed as usize) % shuffled.len();
        shuffled.rotate_left(shift);
        shuffled.reverse();

        prop_assert_eq!(
            generate_sap_hosts(&landscape(&hosts, &sorted, true)),
            generate_sap_hosts(&landscape(&hosts, &shuffled, true))
        );
    }

    #[test]
    fn physical_entries_sorted_by_hostname(
        hosts in btree_map(valid_hostname(), host_vars(address()), 1..6),
    ) {
        let mut order: Vec<String> = hosts.keys().cloned().collect();
        order.reverse();
        let entries =
            HostsGenerator::from_vars(&landscape(&hosts, &order, false)).physical_entries();

        // without scale-out every entry belongs to a host in sorted position
        let mut owners: Vec<&str> = Vec::new();
        for entry in &entries {
            if let Some(owner) = hosts.keys().find(|h| entry.hostname == **h) {
                owners.push(owner);
            }
        }
        let mut sorted = owners.clone();
        sorted.sort_unstable();
        prop_assert_eq!(owners, sorted);
    }

    #[test]
    fn no_suffixes_without_scale_out(
        hosts in btree_map(valid_hostname(), host_vars(address()), 1..6),
    ) {
        let order: Vec<String> = hosts.keys().cloned().collect();
        let lines = generate_sap_hosts(&landscape(&hosts, &order, false));
        for suffix in ["-hsr", "-hana", "-inter", "-storage"] {
            prop_assert!(!lines.iter().any(|l| l.contains(suffix)));
        }
    }

    #[test]
    fn hosts_without_addresses_contribute_nothing(
        hosts in btree_map(valid_hostname(), host_vars(address()), 1..6),
        empty in valid_hostname(),
    ) {
        prop_assume!(!hosts.contains_key(&empty));
        let mut with_empty = hosts.clone();
        with_empty.insert(empty.clone(), json!({ "ipadd": [], "supported_tiers": ["hana"] }));

        let order: Vec<String> = hosts.keys().cloned().collect();
        let mut order_with_empty = order.clone();
        order_with_empty.push(empty);

        let generator = HostsGenerator::from_vars(&landscape(&with_empty, &order_with_empty, true));
        let baseline = HostsGenerator::from_vars(&landscape(&hosts, &order, true));
        prop_assert_eq!(generator.physical_entries(), baseline.physical_entries());
    }

    #[test]
    fn generation_never_panics_on_malformed_addresses(
        hosts in btree_map(valid_hostname(), host_vars(any_address()), 0..6),
        viewer in prop::option::of(valid_hostname()),
    ) {
        let order: Vec<String> = hosts.keys().cloned().collect();
        let mut generator = HostsGenerator::from_vars(&landscape(&hosts, &order, true));
        if let Some(viewer) = viewer {
            generator = generator.with_viewer(&viewer);
        }
        let lines = generator.generate();
        prop_assert!(lines[0].starts_with("# BEGIN ANSIBLE MANAGED BLOCK"));
    }

    #[test]
    fn formatted_entries_have_fixed_columns(
        ip in address(),
        host in valid_hostname(),
    ) {
        let fqdn = format!("{}.contoso.com", host);
        let line = format_hosts_entry(&ip, &fqdn, &host);
        prop_assert_eq!(line.len(), 19 + 81 + 17);
        prop_assert_eq!(line[..19].trim_end(), ip.as_str());
        prop_assert_eq!(line[19..100].trim_end(), fqdn.as_str());
        prop_assert_eq!(line[100..].trim_end(), host.as_str());
    }
}
