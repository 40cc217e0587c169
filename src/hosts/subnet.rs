//! Subnet membership and CIDR handling.
//!
//! Membership is reported as a tri-state value so callers can tell an
//! address outside a subnet apart from input that could not be parsed.

use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// The subnets an SDAF landscape distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetKind {
    /// Database (HANA system replication / internal) subnet
    Database,
    /// Storage (inter-node) subnet
    Storage,
    /// Client subnet, used by non-database hosts to reach HANA
    Client,
}

impl SubnetKind {
    /// All subnets in classification order.
    pub const ALL: [SubnetKind; 3] = [
        SubnetKind::Database,
        SubnetKind::Storage,
        SubnetKind::Client,
    ];

    /// The variable key holding this subnet's CIDR.
    pub fn key(self) -> &'static str {
        match self {
            SubnetKind::Database => "subnet_cidr_db",
            SubnetKind::Storage => "subnet_cidr_storage",
            SubnetKind::Client => "subnet_cidr_client",
        }
    }

    /// Short label used in header comments.
    pub fn label(self) -> &'static str {
        match self {
            SubnetKind::Database => "DB",
            SubnetKind::Storage => "Storage",
            SubnetKind::Client => "Client",
        }
    }

    /// Lowercase description used in validation messages.
    pub fn description(self) -> &'static str {
        match self {
            SubnetKind::Database => "database",
            SubnetKind::Storage => "storage",
            SubnetKind::Client => "client",
        }
    }
}

impl fmt::Display for SubnetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Result of checking an address against a subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Address and CIDR are valid and the address is inside the subnet
    Member,
    /// Address and CIDR are valid and the address is outside the subnet
    NotMember,
    /// Address or CIDR could not be parsed
    Invalid,
}

impl Membership {
    /// Only a valid member counts as a match.
    pub fn is_member(self) -> bool {
        matches!(self, Membership::Member)
    }
}

/// Parse a CIDR. Host bits may be set (`10.0.0.5/24` is accepted); a bare
/// address is treated as a single-host network.
pub fn parse_cidr(cidr: &str) -> Result<IpNetwork, ipnetwork::IpNetworkError> {
    IpNetwork::from_str(cidr.trim())
}

/// Parse an IPv4 or IPv6 address.
pub fn parse_ip(ip: &str) -> Option<IpAddr> {
    IpAddr::from_str(ip).ok()
}

/// Check whether `ip` lies inside `cidr`.
pub fn membership(ip: &str, cidr: &str) -> Membership {
    let (Some(addr), Ok(network)) = (parse_ip(ip), parse_cidr(cidr)) else {
        return Membership::Invalid;
    };

    if network.contains(addr) {
        Membership::Member
    } else {
        Membership::NotMember
    }
}

/// Whether two networks share any address. Networks of different address
/// families never overlap.
pub fn overlaps(a: &IpNetwork, b: &IpNetwork) -> bool {
    a.contains(b.network()) || b.contains(a.network())
}
