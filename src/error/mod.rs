//! Error handling for the vitals engine.

/// Specialized error type for vital-sign classification and scoring
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    /// A reading failed boundary validation before reaching the engine
    #[error("Validation error: {0}")]
    Validation(String),

    /// A vital type name that is not part of the tracked set (strict policy only)
    #[error("Unknown vital type: {0}")]
    UnknownVitalType(String),

    /// Invalid range table or scoring configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitalsError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for vitals engine operations
pub type Result<T> = std::result::Result<T, VitalsError>;
