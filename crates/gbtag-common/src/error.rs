//! Error types shared across gbtag crates

use thiserror::Error;

/// Result type alias for shared gbtag operations
pub type Result<T> = std::result::Result<T, GbtagError>;

/// Errors raised by the shared infrastructure (logging setup)
#[derive(Error, Debug)]
pub enum GbtagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl GbtagError {
    /// Create an invalid-value error for a named setting
    pub fn invalid_value(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}
