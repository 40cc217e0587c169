//! Network and deployment stage validation filters.
//!
//! Both filters return a mapping with `valid`, `errors` and `warnings`
//! keys, so templates and `assert` tasks can act on the outcome.
//!
//! # Available Filters
//!
//! - `sdaf_validate_network_config`: Check subnet CIDRs and report overlaps
//! - `sdaf_validate_deployment_stage`: Check load balancer settings for a stage
//!
//! # Examples
//!
//! ```jinja2
//! {% set network = vars | sdaf_validate_network_config %}
//! {% if not network.valid %}{{ network.errors | join(', ') }}{% endif %}
//! {{ (vars | sdaf_validate_deployment_stage('post_cluster')).warnings }}
//! ```

use super::value_to_vars;
use crate::hosts::{validate_network_vars, validate_stage_vars, DeploymentStage};
use minijinja::{Environment, Error, ErrorKind, Value};

/// Register all validation filters with the given environment.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("sdaf_validate_network_config", validate_network_config);
    env.add_filter("sdaf_validate_deployment_stage", validate_deployment_stage);
}

/// Validate the `subnet_cidr_db`, `subnet_cidr_storage` and
/// `subnet_cidr_client` settings of a record.
fn validate_network_config(vars: Value) -> Result<Value, Error> {
    let vars = value_to_vars(&vars)?;
    Ok(Value::from_serialize(validate_network_vars(&vars)))
}

/// Validate load balancer settings for a deployment stage.
///
/// # Arguments
///
/// * `vars` - The variable record
/// * `stage` - Optional: `pre_cluster` (default), `post_cluster` or `production`
fn validate_deployment_stage(vars: Value, stage: Option<String>) -> Result<Value, Error> {
    let vars = value_to_vars(&vars)?;
    let stage = match stage {
        Some(stage) => stage
            .parse::<DeploymentStage>()
            .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?,
        None => DeploymentStage::default(),
    };
    Ok(Value::from_serialize(validate_stage_vars(&vars, stage)))
}
