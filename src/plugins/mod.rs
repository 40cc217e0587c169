//! Template plugins for sdaf-hosts.
//!
//! The hosts generator is exposed to Jinja2-style templates as a set of
//! filters, so a playbook template can render the managed block directly:
//!
//! ```jinja2
//! {{ vars | sdaf_generate_sap_hosts(inventory_hostname) | join('\n') }}
//! ```
//!
//! See the [`filter`] module for available filters.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use sdaf_hosts::plugins::filter::FilterRegistry;
//! use minijinja::Environment;
//!
//! let mut env = Environment::new();
//! FilterRegistry::register_all(&mut env);
//! ```

pub mod filter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::filter::FilterRegistry;
}
