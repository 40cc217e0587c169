//! # sdaf-hosts - SAP hosts file generation
//!
//! sdaf-hosts generates the `/etc/hosts` block that the SAP Deployment
//! Automation Framework writes on every host of an SAP landscape on Azure.
//! Given the Ansible variables of a play (SID, domain, play hosts and their
//! addresses, subnet ranges and load balancer addresses) it produces:
//!
//! - **Physical entries**: one line per play host, plus custom tier hostnames
//! - **Scale-out entries**: suffixed names for the database and storage
//!   addresses of HANA scale-out nodes
//! - **Virtual sections**: ASCS/ERS and database virtual hostnames bound to
//!   load balancer frontends
//!
//! When rendered for a specific host in a scale-out landscape, HANA nodes
//! are presented through their client subnet addresses to hosts that are
//! not HANA nodes themselves.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────┐     ┌──────────────────────────┐
//! │   CLI (sdaf-hosts)       │     │   minijinja filters      │
//! └────────────┬─────────────┘     └────────────┬─────────────┘
//!              └───────────────┬────────────────┘
//!                              ▼
//!              ┌───────────────────────────────┐
//!              │  Vars (YAML/JSON record)      │
//!              └───────────────┬───────────────┘
//!                              ▼
//!              ┌───────────────────────────────┐
//!              │  HostsGenerator               │
//!              │  header, physical, sections   │
//!              └───────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use sdaf_hosts::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let vars = Vars::from_file("hosts_vars.yml")?;
//!
//!     let network = validate_network_vars(&vars);
//!     for warning in &network.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     for line in HostsGenerator::from_vars(&vars).generate() {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of commonly used types and functions.

    // Error handling
    pub use crate::error::{Error, Result};
    // Generation
    pub use crate::hosts::{
        format_hosts_entry, generate_sap_hosts, DeploymentConfig, HostsEntry, HostsGenerator,
        Inventory, IsolationMode, NetworkConfig,
    };
    // Validation
    pub use crate::hosts::{
        validate_deployment_stage, validate_network_config, validate_network_vars,
        validate_stage_vars, DeploymentStage, NetworkValidation, StageValidation,
    };
    // Template filters
    pub use crate::plugins::filter::FilterRegistry;
    // Variables
    pub use crate::vars::Vars;
}

// ============================================================================
// Core Modules
// ============================================================================

/// Error types and result aliases for sdaf-hosts operations.
pub mod error;

/// Variable record loading and lenient Ansible-style coercion.
pub mod vars;

// ============================================================================
// Generation
// ============================================================================

/// Hosts block generation, virtual hostnames and validation.
///
/// The entry point is [`HostsGenerator`](hosts::HostsGenerator); the
/// submodules expose the individual building blocks.
pub mod hosts;

// ============================================================================
// Extensibility
// ============================================================================

/// Template filter plugins wrapping the generator.
pub mod plugins;

pub use error::{Error, Result};

/// Returns the current version of sdaf-hosts.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
