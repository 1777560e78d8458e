//! Error Handling
//!
//! Unified error types for the panel services.
//! Uses thiserror for ergonomic error definitions.

use persona_panel_core::CoreError;
use thiserror::Error;

/// Service-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Errors bubbled up from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// None of the requested agent ids resolved to an active persona
    #[error("Empty panel: none of the {requested} requested agents resolved to an active persona")]
    EmptyPanel { requested: usize },

    /// Agent store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for service errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an empty panel error
    pub fn empty_panel(requested: usize) -> Self {
        Self::EmptyPanel { requested }
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Convert AppError to a string suitable for transport-layer responses
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
