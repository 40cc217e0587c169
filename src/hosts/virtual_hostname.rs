//! Virtual hostname derivation following the SDAF naming pattern.

use crate::hosts::config::{DeploymentConfig, VirtualRole};

/// SCS virtual hostname: `<sid>scs<nr>cl1` unless overridden.
pub fn scs_virtual_hostname(config: &DeploymentConfig) -> String {
    match config.custom.get(VirtualRole::Scs) {
        Some(custom) => custom.to_string(),
        None => format!(
            "{}scs{}cl1",
            config.sap_sid.to_lowercase(),
            config.scs_instance_number
        ),
    }
}

/// ERS virtual hostname: `<sid>ers<nr>cl2` unless overridden.
pub fn ers_virtual_hostname(config: &DeploymentConfig) -> String {
    match config.custom.get(VirtualRole::Ers) {
        Some(custom) => custom.to_string(),
        None => format!(
            "{}ers{}cl2",
            config.sap_sid.to_lowercase(),
            config.ers_instance_number
        ),
    }
}

/// Database virtual hostname: `<sid><dbsid>db<nr>cl` unless overridden.
pub fn db_virtual_hostname(config: &DeploymentConfig) -> String {
    match config.custom.get(VirtualRole::Db) {
        Some(custom) => custom.to_string(),
        None => format!(
            "{}{}db{}cl",
            config.sap_sid.to_lowercase(),
            config.db_sid.to_lowercase(),
            config.db_instance_number
        ),
    }
}
