//! Validation of network settings and deployment stages.
//!
//! Validators never fail: they collect every problem into a report that the
//! caller can inspect or print.

use crate::error::Error;
use crate::hosts::config::{DeploymentConfig, NetworkConfig};
use crate::hosts::subnet::{self, SubnetKind};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of [`validate_network_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for NetworkValidation {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl NetworkValidation {
    fn error(&mut self, message: String) {
        self.valid = false;
        self.errors.push(message);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Check that every configured CIDR parses, and warn about overlapping
/// subnets. All subnets are checked; errors do not short-circuit.
pub fn validate_network_config(network: &NetworkConfig) -> NetworkValidation {
    let mut result = NetworkValidation::default();
    let mut parsed: Vec<(SubnetKind, &str, IpNetwork)> = Vec::new();

    for kind in SubnetKind::ALL {
        let Some(cidr) = network.cidr(kind) else {
            continue;
        };
        match subnet::parse_cidr(cidr) {
            Ok(net) => parsed.push((kind, cidr, net)),
            Err(e) => result.error(format!("Invalid {}: {} - {}", kind.key(), cidr, e)),
        }
    }

    for (i, (kind_a, cidr_a, net_a)) in parsed.iter().enumerate() {
        for (kind_b, cidr_b, net_b) in &parsed[i + 1..] {
            if subnet::overlaps(net_a, net_b) {
                result.warnings.push(format!(
                    "{} and {} subnets overlap: {} and {}",
                    capitalize(kind_a.description()),
                    kind_b.description(),
                    cidr_a,
                    cidr_b
                ));
            }
        }
    }

    tracing::debug!(
        valid = result.valid,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "Validated network configuration"
    );
    result
}

/// Point in the deployment at which the configuration is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStage {
    /// Infrastructure exists but the Pacemaker cluster is not active yet
    #[default]
    PreCluster,
    /// The cluster is up and load balancers should answer
    PostCluster,
    /// Steady state
    Production,
}

impl DeploymentStage {
    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentStage::PreCluster => "pre_cluster",
            DeploymentStage::PostCluster => "post_cluster",
            DeploymentStage::Production => "production",
        }
    }
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pre_cluster" => Ok(DeploymentStage::PreCluster),
            "post_cluster" => Ok(DeploymentStage::PostCluster),
            "production" => Ok(DeploymentStage::Production),
            _ => Err(Error::InvalidStage(s.to_string())),
        }
    }
}

/// Outcome of [`validate_deployment_stage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stage: DeploymentStage,
}

impl StageValidation {
    fn new(stage: DeploymentStage) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stage,
        }
    }

    fn error(&mut self, message: &str) {
        self.valid = false;
        self.errors.push(message.to_string());
    }
}

/// Check the load balancer settings expected at a deployment stage.
pub fn validate_deployment_stage(
    config: &DeploymentConfig,
    stage: DeploymentStage,
) -> StageValidation {
    let mut result = StageValidation::new(stage);

    match stage {
        DeploymentStage::PreCluster => {
            if config.scs_high_availability {
                if config.scs_lb_ip.is_none() || config.ers_lb_ip.is_none() {
                    result.error("SCS HA enabled but load balancer IPs not configured");
                } else {
                    result.warnings.push(
                        "Load balancer IPs configured but not yet active (expected at pre-cluster stage)"
                            .to_string(),
                    );
                }
            }

            if config.db_high_availability && config.db_lb_ip.is_none() {
                result.error("Database HA enabled but load balancer IP not configured");
            }
        }
        DeploymentStage::PostCluster => {
            result
                .warnings
                .push("Post-cluster stage: Load balancer IPs should now be responsive".to_string());
        }
        DeploymentStage::Production => {}
    }

    result
}
