//! Jinja2-compatible filter plugins for SAP hosts generation.
//!
//! Filters are organized into categories:
//!
//! - **sap_hosts**: hosts block generation and entry formatting
//! - **validation**: network and deployment stage checks
//!
//! # Usage
//!
//! ```rust,ignore
//! use sdaf_hosts::plugins::filter::FilterRegistry;
//! use minijinja::Environment;
//!
//! let mut env = Environment::new();
//! FilterRegistry::register_all(&mut env);
//! ```

pub mod sap_hosts;
pub mod validation;

use crate::vars::Vars;
use minijinja::{Environment, Error, ErrorKind, Value};

/// Registry for managing and registering filter plugins.
pub struct FilterRegistry;

impl FilterRegistry {
    /// Register all available filters with the given environment.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use minijinja::Environment;
    /// use sdaf_hosts::plugins::filter::FilterRegistry;
    ///
    /// let mut env = Environment::new();
    /// FilterRegistry::register_all(&mut env);
    /// ```
    pub fn register_all(env: &mut Environment<'static>) {
        sap_hosts::register_filters(env);
        validation::register_filters(env);
    }

    /// Register only the generation filters.
    pub fn register_sap_hosts(env: &mut Environment<'static>) {
        sap_hosts::register_filters(env);
    }

    /// Register only the validation filters.
    pub fn register_validation(env: &mut Environment<'static>) {
        validation::register_filters(env);
    }
}

/// Convert a template value into a variable record. Undefined and none
/// become an empty record; anything other than a mapping is rejected.
pub(crate) fn value_to_vars(value: &Value) -> Result<Vars, Error> {
    let json = serde_json::to_value(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot convert value to a variable record: {}", e),
        )
    })?;
    Vars::from_json(json).map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))
}
