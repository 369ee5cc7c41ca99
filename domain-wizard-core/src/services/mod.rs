//! Business logic service layer

mod wizard_service;

pub use wizard_service::WizardService;

use std::sync::Arc;

use domain_wizard_registry::DomainRegistry;

use crate::traits::DnsVerifier;
use crate::types::WizardConfig;

/// Service context - holds all dependencies.
///
/// The platform layer creates this context and injects its registry and
/// verifier implementations.
pub struct ServiceContext {
    /// Receiving-domain registry
    pub domain_registry: Arc<dyn DomainRegistry>,
    /// DNS verification backend
    pub dns_verifier: Arc<dyn DnsVerifier>,
    /// Mail platform facts the record templates derive from
    pub config: WizardConfig,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        domain_registry: Arc<dyn DomainRegistry>,
        dns_verifier: Arc<dyn DnsVerifier>,
        config: WizardConfig,
    ) -> Self {
        Self {
            domain_registry,
            dns_verifier,
            config,
        }
    }
}
