//! Integration tests for the template filters.
//!
//! Templates are rendered through minijinja the way a playbook template
//! would use them.

use minijinja::{context, Environment, Value};
use sdaf_hosts::hosts::format_hosts_entry;
use sdaf_hosts::plugins::filter::FilterRegistry;
use serde_json::json;

fn create_env() -> Environment<'static> {
    let mut env = Environment::new();
    FilterRegistry::register_all(&mut env);
    env
}

fn landscape() -> Value {
    Value::from_serialize(json!({
        "sap_sid": "X00",
        "sap_fqdn": "contoso.com",
        "database_scale_out": true,
        "subnet_cidr_db": "10.0.1.0/24",
        "subnet_cidr_client": "10.0.3.0/24",
        "ansible_play_hosts": ["db0", "app0"],
        "hostvars": {
            "db0": { "ipadd": ["10.0.1.4", "10.0.3.4"], "supported_tiers": ["hana"] },
            "app0": { "ipadd": ["10.0.3.10"], "supported_tiers": ["app"] }
        }
    }))
}

// ============================================================================
// Generation Filters
// ============================================================================

mod generation_filters {
    use super::*;

    #[test]
    fn test_render_hosts_block() {
        let env = create_env();
        let output = env
            .render_str(
                r"{{ record | sdaf_generate_sap_hosts | join('\n') }}",
                context! { record => landscape() },
            )
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "# BEGIN ANSIBLE MANAGED BLOCK - X00");
        assert!(output.contains(&format_hosts_entry("10.0.3.10", "app0.contoso.com", "app0")));
        assert!(output.contains(&format_hosts_entry("10.0.1.4", "db0.contoso.com", "db0")));
        assert_eq!(*lines.last().unwrap(), "# END ANSIBLE MANAGED BLOCK - X00");
    }

    #[test]
    fn test_render_for_viewing_host() {
        let env = create_env();
        let output = env
            .render_str(
                r"{{ record | sdaf_generate_sap_hosts(viewer) | join('\n') }}",
                context! { record => landscape(), viewer => "app0" },
            )
            .unwrap();

        assert!(output.contains("# Network isolation: filtered view (client subnet only)"));
        assert!(output.contains(&format_hosts_entry("10.0.3.4", "db0.contoso.com", "db0")));
    }

    #[test]
    fn test_format_entry_filter() {
        let env = create_env();
        let output = env
            .render_str(
                "{{ ip | sdaf_format_hosts_entry(fqdn, name) }}",
                context! {
                    ip => "10.0.0.5",
                    fqdn => "x00scs00cl1.contoso.com",
                    name => "x00scs00cl1",
                },
            )
            .unwrap();

        assert_eq!(
            output,
            format_hosts_entry("10.0.0.5", "x00scs00cl1.contoso.com", "x00scs00cl1")
        );
    }

    #[test]
    fn test_generate_rejects_non_mapping_input() {
        let env = create_env();
        let result = env.render_str("{{ 'x00' | sdaf_generate_sap_hosts }}", context! {});
        assert!(result.is_err());
    }
}

// ============================================================================
// Validation Filters
// ============================================================================

mod validation_filters {
    use super::*;

    #[test]
    fn test_overlapping_subnets_warn() {
        let env = create_env();
        let record = Value::from_serialize(json!({
            "subnet_cidr_db": "10.0.0.0/24",
            "subnet_cidr_storage": "10.0.0.0/25"
        }));
        let output = env
            .render_str(
                concat!(
                    "{% set r = record | sdaf_validate_network_config %}",
                    "{{ r.valid }}|{{ r.errors | length }}|{{ r.warnings | length }}"
                ),
                context! { record => record },
            )
            .unwrap();
        assert_eq!(output, "True|0|1");
    }

    #[test]
    fn test_invalid_cidr_reported() {
        let env = create_env();
        let record = Value::from_serialize(json!({ "subnet_cidr_db": "10.0.0.0/99" }));
        let output = env
            .render_str(
                "{% set r = record | sdaf_validate_network_config %}{{ r.valid }}|{{ r.errors[0] }}",
                context! { record => record },
            )
            .unwrap();
        assert!(output.starts_with("False|Invalid subnet_cidr_db: 10.0.0.0/99"));
    }

    #[test]
    fn test_stage_validation() {
        let env = create_env();
        let record = Value::from_serialize(json!({
            "database_high_availability": true
        }));

        let pre = env
            .render_str(
                "{{ (record | sdaf_validate_deployment_stage).errors | join(';') }}",
                context! { record => record.clone() },
            )
            .unwrap();
        assert_eq!(pre, "Database HA enabled but load balancer IP not configured");

        let production = env
            .render_str(
                "{{ (record | sdaf_validate_deployment_stage('production')).valid }}",
                context! { record => record },
            )
            .unwrap();
        assert_eq!(production, "True");
    }

    #[test]
    fn test_unknown_stage_fails_render() {
        let env = create_env();
        let result = env.render_str(
            "{{ record | sdaf_validate_deployment_stage('staging') }}",
            context! { record => landscape() },
        );
        assert!(result.is_err());
    }
}
