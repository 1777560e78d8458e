//! Core Error Types
//!
//! Errors raised while reading persona data in the core crate. Only
//! thiserror + serde_json are needed so the crate stays lightweight.
//!
//! The root crate wraps these in `AppError` and adds the panel-level
//! conditions (empty panel, store failures).

use thiserror::Error;

/// Core error type for the Persona Panel workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Structurally valid data that breaks a rule (blank persona id)
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
