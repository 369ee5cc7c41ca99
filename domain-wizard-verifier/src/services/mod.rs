//! Stateless service façade for DNS verification.

mod resolver;
mod verify;

use crate::error::{VerifierError, VerifierResult};
use crate::types::{DnsVerificationReport, ExpectedRecords};

/// Maximum domain name length per RFC 1035.
const MAX_DOMAIN_LEN: usize = 253;

/// Validate and normalise a bare domain name.
///
/// Trims whitespace, lowercases, and rejects empty, overlong, or
/// whitespace-containing inputs. Address-suffix form (`@domain`) is not
/// accepted here; the caller strips the `@` before verification.
fn validate_domain(domain: &str) -> VerifierResult<String> {
    let domain = domain.trim().to_lowercase();
    if domain.is_empty() {
        return Err(VerifierError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(VerifierError::ValidationError(format!(
            "Domain name exceeds maximum length of {MAX_DOMAIN_LEN} characters (got {})",
            domain.len()
        )));
    }
    if domain.chars().any(char::is_whitespace) || domain.starts_with('@') {
        return Err(VerifierError::ValidationError(format!(
            "Invalid domain name: {domain}"
        )));
    }
    Ok(domain)
}

/// Entry point for all verification operations.
///
/// All methods are stateless associated functions — call them directly on
/// the type.
pub struct VerificationService;

impl VerificationService {
    /// Run all four checks (`mx`, `spf`, `dkim`, `dmarc`) against a domain.
    ///
    /// Lookups run concurrently; a missing record grades the corresponding
    /// check as `fail` rather than failing the whole call.
    pub async fn verify_domain(
        domain: &str,
        expected: &ExpectedRecords,
    ) -> VerifierResult<DnsVerificationReport> {
        let domain = validate_domain(domain)?;
        log::debug!("Verifying DNS records for {domain}");
        Ok(verify::verify_domain(&domain, expected).await)
    }
}
