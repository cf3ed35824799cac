//! Error handling for the Grain Contract Management client
//!
//! Failures in the consuming layer never reach the shared engine: callers
//! either propagate an `AppError` to the binary boundary or degrade to a
//! placeholder value (empty list, placeholder address) at the fetch site.

use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: credentials missing or rejected by the CRM")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("CRM API error: {status} - {message}")]
    CrmApi { status: u16, message: String },

    #[error("Failed to decode CRM payload: {0}")]
    Decode(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
