//! Error types for the mock harness
//!
//! One error enum per layer:
//! - `StoreError`: record store failures
//! - `FactoryError`: fixture engine failures
//! - `InterceptError`: request interception failures
//! - `HarnessError`: harness usage errors (wraps collaborator errors untouched)

use thiserror::Error;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {model_type}#{id}")]
    NotFound { model_type: String, id: String },

    #[error("Payload for '{0}' has no id")]
    MissingId(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Fixture engine errors
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("No fixture named '{0}' is defined")]
    UnknownFixture(String),

    #[error("Fixture '{fixture}' has no trait named '{name}'")]
    UnknownTrait { fixture: String, name: String },

    #[error("Invalid attributes: {0}")]
    InvalidAttributes(String),
}

/// Request interception errors
#[derive(Debug, Error)]
pub enum InterceptError {
    #[error("Stub rejected: {0}")]
    Rejected(String),
}

/// Harness errors - what a test sees when it misuses the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{context}: {reason}")]
    InvalidArguments { context: String, reason: String },

    #[error("Harness used before setup")]
    NotSetUp,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Factory(#[from] FactoryError),

    #[error(transparent)]
    Intercept(#[from] InterceptError),
}

impl HarnessError {
    pub fn invalid_arguments(context: &str, reason: impl Into<String>) -> Self {
        HarnessError::InvalidArguments {
            context: context.to_string(),
            reason: reason.into(),
        }
    }
}
