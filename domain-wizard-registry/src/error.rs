//! Unified error type for registry operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry error type.
///
/// Transient variants ([`NetworkError`](Self::NetworkError),
/// [`Timeout`](Self::Timeout), [`RateLimited`](Self::RateLimited)) may succeed
/// on retry; everything else requires operator action.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RegistryError {
    /// A network-level error occurred (connection refused, DNS failure, etc.).
    #[error("Network error: {detail}")]
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    #[error("Request timeout: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// A domain row with the same name already exists.
    #[error("Domain '{domain}' already exists")]
    DomainExists {
        /// Name of the conflicting domain.
        domain: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The specified domain row was not found.
    #[error("Domain '{domain_id}' not found")]
    DomainNotFound {
        /// ID of the domain that was not found.
        domain_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g. empty name, empty patch).
    #[error("Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what is wrong.
        detail: String,
    },

    /// The API key is missing, invalid, or expired.
    #[error("Registry rejected the API key")]
    Unauthorized {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    #[error("Rate limited by the registry")]
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the registry's API response.
    #[error("Failed to parse registry response: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the registry API.
    #[error("Registry error: {raw_message}")]
    Unknown {
        /// HTTP status code, if the request got that far.
        status: Option<u16>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl RegistryError {
    /// Whether this is expected behavior (user input, resource not found),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`. **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::DomainExists { .. }
                | Self::DomainNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::Unauthorized { .. }
        )
    }
}

/// Registry Result type alias.
pub type Result<T> = std::result::Result<T, RegistryError>;
