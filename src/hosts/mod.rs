//! SAP hosts file generation for SDAF landscapes.
//!
//! The generator turns an Ansible variable record into the lines of a
//! managed `/etc/hosts` block:
//!
//! ```text
//! # BEGIN ANSIBLE MANAGED BLOCK - X00
//! # SID: X00
//! # ...header comments...
//!
//! 10.0.1.4           x00db00l0.contoso.com                                      x00db00l0
//! 10.0.2.4           x00db00l0-hsr.contoso.com                                  x00db00l0-hsr
//! # END ANSIBLE MANAGED BLOCK - X00
//!
//! # BEGIN ASCS/ERS Entries x00scs00cl1
//! ...
//! # END ASCS/ERS Entries x00scs00cl1
//! ```
//!
//! Generation is a pure function of the record: nothing is cached and
//! nothing fails. Malformed addresses and CIDRs only ever cause individual
//! entries to be dropped; [`validate_network_config`] reports them.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdaf_hosts::hosts::HostsGenerator;
//! use sdaf_hosts::vars::Vars;
//!
//! let vars = Vars::from_file("hosts_vars.yml")?;
//! for line in HostsGenerator::from_vars(&vars).generate() {
//!     println!("{}", line);
//! }
//! ```

pub mod config;
pub mod entry;
pub mod physical;
pub mod sections;
pub mod subnet;
pub mod validate;
pub mod virtual_hostname;

pub use config::{CustomHostnames, DeploymentConfig, NetworkConfig, VirtualRole};
pub use entry::{format_hosts_entry, HostsEntry};
pub use physical::{HostRecord, Inventory, IsolationMode, Viewer};
pub use subnet::{Membership, SubnetKind};
pub use validate::{
    validate_deployment_stage, validate_network_config, DeploymentStage, NetworkValidation,
    StageValidation,
};

use crate::vars::Vars;

/// Hosts file generator for one rendering of the managed block.
#[derive(Debug, Clone)]
pub struct HostsGenerator {
    deployment: DeploymentConfig,
    network: NetworkConfig,
    inventory: Inventory,
    viewer: Option<Viewer>,
}

impl HostsGenerator {
    /// Build a generator from a variable record. The viewing host is taken
    /// from `inventory_hostname` when present.
    pub fn from_vars(vars: &Vars) -> Self {
        let generator = Self::new(
            DeploymentConfig::from_vars(vars),
            NetworkConfig::from_vars(vars),
            Inventory::from_vars(vars),
        );

        match vars.lookup_optional(&config::rules::INVENTORY_HOSTNAME) {
            Some(viewer) => generator.with_viewer(&viewer),
            None => generator,
        }
    }

    /// Build a generator from already extracted settings.
    pub fn new(deployment: DeploymentConfig, network: NetworkConfig, inventory: Inventory) -> Self {
        Self {
            deployment,
            network,
            inventory,
            viewer: None,
        }
    }

    /// Render on behalf of a specific host.
    pub fn with_viewer(mut self, hostname: &str) -> Self {
        self.viewer = Some(Viewer::resolve(hostname, &self.inventory));
        self
    }

    /// Render without a viewing host: every address is shown.
    pub fn without_viewer(mut self) -> Self {
        self.viewer = None;
        self
    }

    pub fn deployment(&self) -> &DeploymentConfig {
        &self.deployment
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    /// The isolation mode in effect for this rendering.
    pub fn isolation(&self) -> Option<IsolationMode> {
        IsolationMode::for_viewer(&self.deployment, self.viewer.as_ref())
    }

    /// Physical host entries, in hostname order.
    pub fn physical_entries(&self) -> Vec<HostsEntry> {
        physical::physical_host_entries(
            &self.inventory,
            &self.deployment,
            &self.network,
            self.isolation(),
        )
    }

    /// Generate the complete block: header, physical entries, footer and
    /// the virtual hostname sections.
    pub fn generate(&self) -> Vec<String> {
        let isolation = self.isolation();
        tracing::debug!(
            sid = %self.deployment.sap_sid,
            hosts = self.inventory.len(),
            viewer = ?self.viewer.as_ref().map(|v| v.hostname.as_str()),
            ?isolation,
            "Generating SAP hosts entries"
        );

        let mut lines = sections::main_section_header(
            &self.deployment,
            &self.network,
            self.inventory.play_host_count,
            isolation,
        );
        lines.push(String::new());
        lines.extend(self.physical_entries().iter().map(HostsEntry::render));
        lines.extend(sections::main_section_footer(&self.deployment));
        lines.extend(sections::virtual_hostname_sections(&self.deployment));
        lines
    }
}

/// Generate the hosts block for a variable record.
pub fn generate_sap_hosts(vars: &Vars) -> Vec<String> {
    HostsGenerator::from_vars(vars).generate()
}

/// Validate the subnet CIDRs in a variable record.
pub fn validate_network_vars(vars: &Vars) -> NetworkValidation {
    validate_network_config(&NetworkConfig::from_vars(vars))
}

/// Validate the load balancer settings in a variable record for a stage.
pub fn validate_stage_vars(vars: &Vars, stage: DeploymentStage) -> StageValidation {
    validate_deployment_stage(&DeploymentConfig::from_vars(vars), stage)
}
