// assessa-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(assessa::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- DOCUMENTS ---
    #[error("Document Encoding Error: {0}")]
    #[diagnostic(
        code(assessa::infra::json),
        help("The stored document does not match the expected layout.")
    )]
    Json(#[from] serde_json::Error),

    #[error("Document key '{0}' is not allowed")]
    #[diagnostic(
        code(assessa::infra::unsafe_key),
        help("Keys and collection segments cannot be empty, contain path separators or '..'.")
    )]
    UnsafeKey(String),

    #[error("Store operation '{operation}' timed out after {after:?}")]
    #[diagnostic(
        code(assessa::infra::timeout),
        help("Raise gateway.timeout_ms or check the store's availability.")
    )]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(assessa::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(assessa::infra::config))]
    ConfigError(String),

    #[error("Invalid settings: {0}")]
    #[diagnostic(code(assessa::infra::settings))]
    InvalidSettings(#[from] validator::ValidationErrors),
}
