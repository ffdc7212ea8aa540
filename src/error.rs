//! Error types for the response engine

use thiserror::Error;

/// Engine errors
///
/// Expected no-match conditions (no intent score, no entity, no pattern hit,
/// no similar knowledge entry) are modeled as `Option::None` by the
/// components, never as errors. These variants cover the unexpected cases
/// the orchestrator converts into its fallback reply.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<regex::Error> for EngineError {
    fn from(err: regex::Error) -> Self {
        EngineError::Configuration(format!("Invalid pattern: {}", err))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
