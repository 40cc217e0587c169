//! Deployment and network settings extracted from a variable record.
//!
//! Every field is resolved through a [`VarRule`] with an explicit default, so
//! legacy key names and precedence are declared once in [`rules`] instead of
//! being scattered through the generator.

use crate::hosts::subnet::{self, Membership, SubnetKind};
use crate::vars::{VarRule, Vars};
use serde::{Deserialize, Serialize};

/// Variable rules used during extraction, in the order they are resolved.
pub mod rules {
    use crate::vars::VarRule;

    pub const SAP_SID: VarRule = VarRule::key("sap_sid");
    pub const SAP_FQDN: VarRule = VarRule::key("sap_fqdn");
    pub const DB_SID: VarRule = VarRule::key("db_sid");

    pub const DB_SCALE_OUT: VarRule = VarRule::key("database_scale_out");
    pub const DB_HIGH_AVAILABILITY: VarRule =
        VarRule::with_aliases("database_high_availability", &["db_high_availability"]);
    pub const DB_INSTANCE_NUMBER: VarRule = VarRule::key("db_instance_number");
    pub const DB_LB_IP: VarRule = VarRule::with_aliases("database_loadbalancer_ip", &["db_lb_ip"]);

    pub const SCS_HIGH_AVAILABILITY: VarRule = VarRule::key("scs_high_availability");
    pub const SCS_INSTANCE_NUMBER: VarRule = VarRule::key("scs_instance_number");
    pub const ERS_INSTANCE_NUMBER: VarRule = VarRule::key("ers_instance_number");
    pub const SCS_LB_IP: VarRule = VarRule::key("scs_lb_ip");
    pub const ERS_LB_IP: VarRule = VarRule::key("ers_lb_ip");

    pub const SUBNET_CIDR_DB: VarRule = VarRule::key("subnet_cidr_db");
    pub const SUBNET_CIDR_STORAGE: VarRule = VarRule::key("subnet_cidr_storage");
    pub const SUBNET_CIDR_CLIENT: VarRule = VarRule::key("subnet_cidr_client");

    pub const PLAY_HOSTS: VarRule = VarRule::key("ansible_play_hosts");
    pub const HOSTVARS: VarRule = VarRule::key("hostvars");
    pub const INVENTORY_HOSTNAME: VarRule = VarRule::key("inventory_hostname");

    /// Default SCS instance number.
    pub const DEFAULT_SCS_INSTANCE: &str = "00";
    /// Default ERS instance number.
    pub const DEFAULT_ERS_INSTANCE: &str = "01";
    /// Default database instance number.
    pub const DEFAULT_DB_INSTANCE: &str = "00";
}

/// A role that can carry a custom virtual hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VirtualRole {
    /// ABAP SAP Central Services
    Scs,
    /// Enqueue Replication Server
    Ers,
    /// Database
    Db,
    /// Primary application server
    Pas,
    /// Additional application server
    App,
    /// Web dispatcher
    Web,
}

/// Host tiers that map to a custom-hostname-capable role.
const TIER_ROLES: &[(&str, VirtualRole)] = &[
    ("pas", VirtualRole::Pas),
    ("app", VirtualRole::App),
    ("web", VirtualRole::Web),
];

impl VirtualRole {
    /// All roles.
    pub const ALL: [VirtualRole; 6] = [
        VirtualRole::Scs,
        VirtualRole::Ers,
        VirtualRole::Db,
        VirtualRole::Pas,
        VirtualRole::App,
        VirtualRole::Web,
    ];

    /// The variable key holding the custom hostname for this role.
    pub fn custom_hostname_key(self) -> &'static str {
        match self {
            VirtualRole::Scs => "custom_scs_virtual_hostname",
            VirtualRole::Ers => "custom_ers_virtual_hostname",
            VirtualRole::Db => "custom_db_virtual_hostname",
            VirtualRole::Pas => "custom_pas_virtual_hostname",
            VirtualRole::App => "custom_app_virtual_hostname",
            VirtualRole::Web => "custom_web_virtual_hostname",
        }
    }

    /// Map a host tier tag to the role whose custom hostname it carries.
    pub fn for_tier(tier: &str) -> Option<VirtualRole> {
        TIER_ROLES
            .iter()
            .find(|(tag, _)| *tag == tier)
            .map(|(_, role)| *role)
    }
}

/// Custom virtual hostname overrides, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostnames {
    pub scs: Option<String>,
    pub ers: Option<String>,
    pub db: Option<String>,
    pub pas: Option<String>,
    pub app: Option<String>,
    pub web: Option<String>,
}

impl CustomHostnames {
    /// Read every `custom_*_virtual_hostname` key from a record.
    pub fn from_vars(vars: &Vars) -> Self {
        let mut custom = Self::default();
        for role in VirtualRole::ALL {
            let rule = VarRule::key(role.custom_hostname_key());
            *custom.slot_mut(role) = vars.lookup_optional(&rule);
        }
        custom
    }

    /// The override for a role, if one is set.
    pub fn get(&self, role: VirtualRole) -> Option<&str> {
        match role {
            VirtualRole::Scs => self.scs.as_deref(),
            VirtualRole::Ers => self.ers.as_deref(),
            VirtualRole::Db => self.db.as_deref(),
            VirtualRole::Pas => self.pas.as_deref(),
            VirtualRole::App => self.app.as_deref(),
            VirtualRole::Web => self.web.as_deref(),
        }
    }

    fn slot_mut(&mut self, role: VirtualRole) -> &mut Option<String> {
        match role {
            VirtualRole::Scs => &mut self.scs,
            VirtualRole::Ers => &mut self.ers,
            VirtualRole::Db => &mut self.db,
            VirtualRole::Pas => &mut self.pas,
            VirtualRole::App => &mut self.app,
            VirtualRole::Web => &mut self.web,
        }
    }
}

/// SAP deployment topology settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// SAP system ID, uppercased
    pub sap_sid: String,
    /// Domain suffix appended to every hostname
    pub sap_fqdn: String,
    /// Database SID, uppercased
    pub db_sid: String,

    pub scale_out: bool,
    pub db_high_availability: bool,
    pub db_instance_number: String,
    pub db_lb_ip: Option<String>,

    pub scs_high_availability: bool,
    pub scs_instance_number: String,
    pub ers_instance_number: String,
    pub scs_lb_ip: Option<String>,
    pub ers_lb_ip: Option<String>,

    pub custom: CustomHostnames,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::from_vars(&Vars::new())
    }
}

impl DeploymentConfig {
    /// Extract the deployment settings from a variable record.
    pub fn from_vars(vars: &Vars) -> Self {
        Self {
            sap_sid: vars.lookup_string(&rules::SAP_SID, "").to_uppercase(),
            sap_fqdn: vars.lookup_string(&rules::SAP_FQDN, ""),
            db_sid: vars.lookup_string(&rules::DB_SID, "").to_uppercase(),

            scale_out: vars.lookup_bool(&rules::DB_SCALE_OUT, false),
            db_high_availability: vars.lookup_bool(&rules::DB_HIGH_AVAILABILITY, false),
            db_instance_number: vars
                .lookup_instance_number(&rules::DB_INSTANCE_NUMBER, rules::DEFAULT_DB_INSTANCE),
            db_lb_ip: vars.lookup_optional(&rules::DB_LB_IP),

            scs_high_availability: vars.lookup_bool(&rules::SCS_HIGH_AVAILABILITY, false),
            scs_instance_number: vars
                .lookup_instance_number(&rules::SCS_INSTANCE_NUMBER, rules::DEFAULT_SCS_INSTANCE),
            ers_instance_number: vars
                .lookup_instance_number(&rules::ERS_INSTANCE_NUMBER, rules::DEFAULT_ERS_INSTANCE),
            scs_lb_ip: vars.lookup_optional(&rules::SCS_LB_IP),
            ers_lb_ip: vars.lookup_optional(&rules::ERS_LB_IP),

            custom: CustomHostnames::from_vars(vars),
        }
    }

    /// Build `<name>.<fqdn>`.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", name, self.sap_fqdn)
    }
}

/// Subnet CIDRs used to classify host addresses.
///
/// A CIDR is only present when it is non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub subnet_cidr_db: Option<String>,
    pub subnet_cidr_storage: Option<String>,
    pub subnet_cidr_client: Option<String>,
}

impl NetworkConfig {
    /// Extract the subnet CIDRs from a variable record.
    pub fn from_vars(vars: &Vars) -> Self {
        Self {
            subnet_cidr_db: vars.lookup_optional(&rules::SUBNET_CIDR_DB),
            subnet_cidr_storage: vars.lookup_optional(&rules::SUBNET_CIDR_STORAGE),
            subnet_cidr_client: vars.lookup_optional(&rules::SUBNET_CIDR_CLIENT),
        }
    }

    /// The CIDR configured for a subnet.
    pub fn cidr(&self, kind: SubnetKind) -> Option<&str> {
        let cidr = match kind {
            SubnetKind::Database => self.subnet_cidr_db.as_deref(),
            SubnetKind::Storage => self.subnet_cidr_storage.as_deref(),
            SubnetKind::Client => self.subnet_cidr_client.as_deref(),
        };
        cidr.filter(|c| !c.trim().is_empty())
    }

    /// Whether a subnet is configured.
    pub fn is_present(&self, kind: SubnetKind) -> bool {
        self.cidr(kind).is_some()
    }

    /// Classify an address against one subnet.
    pub fn membership(&self, kind: SubnetKind, ip: &str) -> Membership {
        match self.cidr(kind) {
            Some(cidr) => subnet::membership(ip, cidr),
            None => Membership::NotMember,
        }
    }

    /// Whether an address lies inside a subnet.
    pub fn contains(&self, kind: SubnetKind, ip: &str) -> bool {
        self.membership(kind, ip).is_member()
    }
}
