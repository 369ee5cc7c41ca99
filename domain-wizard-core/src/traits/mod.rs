//! Abstraction traits for injected backends

mod dns_verifier;

pub use dns_verifier::{DnsVerifier, ResolverDnsVerifier};

// The registry side of the seam lives in the registry crate.
pub use domain_wizard_registry::DomainRegistry;
