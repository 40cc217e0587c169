//! Comment headers and the virtual hostname sections (ASCS/ERS and DB).

use crate::hosts::config::{DeploymentConfig, NetworkConfig};
use crate::hosts::entry::HostsEntry;
use crate::hosts::physical::IsolationMode;
use crate::hosts::subnet::SubnetKind;
use crate::hosts::virtual_hostname::{
    db_virtual_hostname, ers_virtual_hostname, scs_virtual_hostname,
};

/// Boolean rendering used in header comments.
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Header comments for the main block.
pub fn main_section_header(
    config: &DeploymentConfig,
    network: &NetworkConfig,
    host_count: usize,
    isolation: Option<IsolationMode>,
) -> Vec<String> {
    let mut lines = vec![
        format!("# BEGIN ANSIBLE MANAGED BLOCK - {}", config.sap_sid),
        format!("# SID: {}", config.sap_sid),
        format!("# {} Hosts", host_count),
        format!("# Scale out: {}", flag(config.scale_out)),
        format!("# High availability: {}", flag(config.db_high_availability)),
    ];

    for kind in SubnetKind::ALL {
        lines.push(format!(
            "# Subnet {} valid: {}",
            kind.label(),
            flag(network.is_present(kind))
        ));
    }

    match isolation {
        Some(IsolationMode::Filtered) => {
            lines.push("# Network isolation: filtered view (client subnet only)".to_string())
        }
        Some(IsolationMode::Full) => {
            lines.push("# Network isolation: full view (database host)".to_string())
        }
        None => {}
    }

    lines
}

/// Footer comment for the main block.
pub fn main_section_footer(config: &DeploymentConfig) -> Vec<String> {
    vec![format!("# END ANSIBLE MANAGED BLOCK - {}", config.sap_sid)]
}

fn virtual_entry(ip: &str, name: &str, config: &DeploymentConfig) -> Option<String> {
    HostsEntry::checked(ip, config.qualify(name), name).map(|e| e.render())
}

/// The ASCS/ERS section, emitted only when SCS high availability is on.
/// Each of the SCS and ERS lines needs its own load balancer address.
pub fn scs_ers_section(config: &DeploymentConfig) -> Vec<String> {
    if !config.scs_high_availability {
        return Vec::new();
    }

    let scs = scs_virtual_hostname(config);
    let ers = ers_virtual_hostname(config);

    let mut lines = vec![format!("# BEGIN ASCS/ERS Entries {}", scs)];
    if let Some(ip) = config.scs_lb_ip.as_deref() {
        lines.extend(virtual_entry(ip, &scs, config));
    }
    if let Some(ip) = config.ers_lb_ip.as_deref() {
        lines.extend(virtual_entry(ip, &ers, config));
    }
    lines.push(format!("# END ASCS/ERS Entries {}", scs));
    lines
}

/// The DB section, emitted only when database high availability is on and
/// a database load balancer address is set.
pub fn database_section(config: &DeploymentConfig) -> Vec<String> {
    let Some(ip) = config.db_lb_ip.as_deref() else {
        return Vec::new();
    };
    if !config.db_high_availability {
        return Vec::new();
    }

    let db = db_virtual_hostname(config);
    let Some(entry) = virtual_entry(ip, &db, config) else {
        return Vec::new();
    };

    vec![
        format!("# BEGIN DB Entries {}", db),
        entry,
        format!("# END DB Entries {}", db),
    ]
}

/// Both virtual hostname sections, each preceded by a blank line.
pub fn virtual_hostname_sections(config: &DeploymentConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for section in [scs_ers_section(config), database_section(config)] {
        if !section.is_empty() {
            lines.push(String::new());
            lines.extend(section);
        }
    }
    lines
}
