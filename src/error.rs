//! Error types for sdaf-hosts.
//!
//! The hosts generator itself never fails: malformed addresses and missing
//! settings are absorbed into its output. Errors only arise at the edges,
//! when variable files are loaded or a caller asks for something that does
//! not exist.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sdaf-hosts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for sdaf-hosts.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Variable Errors
    // ========================================================================
    /// Error reading a variables file.
    #[error("Failed to read variables from '{path}': {message}")]
    VarsLoad {
        /// Path to the variables file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The variables document is not a mapping.
    #[error("Variables must be a mapping, got {0}")]
    VarsNotMapping(String),

    /// Invalid extra variable expression.
    #[error("Invalid extra variable '{0}': expected key=value or @file")]
    InvalidExtraVar(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Unknown deployment stage name.
    #[error("Unknown deployment stage '{0}': expected pre_cluster, post_cluster or production")]
    InvalidStage(String),

    // ========================================================================
    // Wrapped Errors
    // ========================================================================
    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a variables load error.
    pub fn vars_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::VarsLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}
