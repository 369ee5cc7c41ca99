//! Unified error type definition.

use serde::Serialize;
use thiserror::Error;

/// Verifier error type.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum VerifierError {
    /// Validation error (malformed domain input).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Network error (resolver could not be reached).
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Verifier Result type alias.
pub type VerifierResult<T> = std::result::Result<T, VerifierError>;
