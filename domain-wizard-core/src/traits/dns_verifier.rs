//! DNS verification abstraction.

use async_trait::async_trait;

use domain_wizard_verifier::{DnsVerificationReport, ExpectedRecords, VerificationService};

use crate::error::CoreResult;

/// Verification backend checking a domain's published DNS against the
/// expected record set.
///
/// Implementations:
/// - [`ResolverDnsVerifier`] — live lookups via `domain-wizard-verifier`
/// - `MockDnsVerifier` — scripted results, test builds only
#[async_trait]
pub trait DnsVerifier: Send + Sync {
    /// Run all four checks against a bare domain name.
    async fn verify_domain(
        &self,
        domain: &str,
        expected: &ExpectedRecords,
    ) -> CoreResult<DnsVerificationReport>;
}

/// Resolver-backed verifier using the host system DNS configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverDnsVerifier;

impl ResolverDnsVerifier {
    /// Create a verifier instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DnsVerifier for ResolverDnsVerifier {
    async fn verify_domain(
        &self,
        domain: &str,
        expected: &ExpectedRecords,
    ) -> CoreResult<DnsVerificationReport> {
        Ok(VerificationService::verify_domain(domain, expected).await?)
    }
}
