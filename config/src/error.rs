//! Error types for form definition loading.
//!
//! Provides a unified error type covering I/O, serialization, definition
//! validation, and the form and session errors raised while building a form.

use formkit_core::FormError;
use formkit_widgets::SessionError;
use thiserror::Error;

/// Errors that can occur while loading or building form definitions.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The definition is well-formed but inconsistent (e.g. a select
    /// without options).
    #[error("invalid form definition: {0}")]
    InvalidDefinition(String),

    /// The fields could not form a valid form (duplicate or conflicting
    /// names).
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// A scripted action was rejected.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
