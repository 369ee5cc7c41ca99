//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use domain_wizard_registry::RegistryError;
pub use domain_wizard_verifier::VerifierError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error (malformed or empty domain name)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Activation was requested before the domain row was created
    #[error("Domain ID not found")]
    DomainIdMissing,

    /// The requested action is not allowed on the current step
    #[error("Step '{step}' does not allow '{action}'")]
    InvalidTransition {
        /// Step the session was on
        step: String,
        /// Action that was attempted
        action: String,
    },

    /// Another request of the same kind has not completed yet
    #[error("A '{action}' request is already in flight")]
    ActionInFlight {
        /// Action that was attempted
        action: String,
    },

    /// Registry error (converted from library)
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// Verifier error (converted from library)
    #[error("{0}")]
    Verifier(#[from] VerifierError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist,
    /// etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_)
            | Self::DomainIdMissing
            | Self::InvalidTransition { .. }
            | Self::ActionInFlight { .. } => true,
            Self::Registry(e) => e.is_expected(),
            Self::Verifier(e) => matches!(e, VerifierError::ValidationError(_)),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
