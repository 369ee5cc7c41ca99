//! Test helper module.
//!
//! Provides mock implementations and convenient factory methods.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use domain_wizard_registry::{
    CreateDomainRequest, DomainPatch, DomainRecord, DomainRegistry, InMemoryDomainRegistry,
    RegistryError,
};
use domain_wizard_verifier::{
    CheckStatus, DnsCheckKind, DnsVerificationReport, ExpectedRecords, RecordCheck, VerifierError,
};
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::services::{ServiceContext, WizardService};
use crate::traits::DnsVerifier;
use crate::types::WizardConfig;

// ===== MockDomainRegistry =====

/// In-memory registry with call counting and error injection.
pub struct MockDomainRegistry {
    inner: InMemoryDomainRegistry,
    /// If Some, every call returns this error (for failure-path tests).
    error: RwLock<Option<RegistryError>>,
    calls: AtomicUsize,
}

impl MockDomainRegistry {
    pub fn new() -> Self {
        Self {
            inner: InMemoryDomainRegistry::new(),
            error: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_error(&self, error: Option<RegistryError>) {
        *self.error.write().await = error;
    }

    /// Number of registry calls issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn intercept(&self) -> Result<(), RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.error.read().await {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DomainRegistry for MockDomainRegistry {
    async fn add_domain(
        &self,
        request: &CreateDomainRequest,
    ) -> Result<DomainRecord, RegistryError> {
        self.intercept().await?;
        self.inner.add_domain(request).await
    }

    async fn update_domain(
        &self,
        domain_id: &str,
        patch: &DomainPatch,
    ) -> Result<DomainRecord, RegistryError> {
        self.intercept().await?;
        self.inner.update_domain(domain_id, patch).await
    }

    async fn get_domain(&self, domain_id: &str) -> Result<DomainRecord, RegistryError> {
        self.inner.get_domain(domain_id).await
    }

    async fn list_domains(&self) -> Result<Vec<DomainRecord>, RegistryError> {
        self.inner.list_domains().await
    }

    async fn delete_domain(&self, domain_id: &str) -> Result<(), RegistryError> {
        self.intercept().await?;
        self.inner.delete_domain(domain_id).await
    }
}

// ===== MockDnsVerifier =====

/// Scripted verifier: checks default to `fail` until a result is set.
pub struct MockDnsVerifier {
    results: std::sync::RwLock<HashMap<DnsCheckKind, RecordCheck>>,
    unreachable: std::sync::RwLock<Option<String>>,
}

impl MockDnsVerifier {
    pub fn new() -> Self {
        Self {
            results: std::sync::RwLock::new(HashMap::new()),
            unreachable: std::sync::RwLock::new(None),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub fn set_pass(&self, kind: DnsCheckKind, message: &str) {
        self.results.write().unwrap().insert(
            kind,
            RecordCheck {
                status: CheckStatus::Pass,
                message: message.to_string(),
                found: Vec::new(),
            },
        );
    }

    /// Make every verification call fail with a network error.
    #[allow(clippy::unwrap_used)]
    pub fn set_unreachable(&self, detail: &str) {
        *self.unreachable.write().unwrap() = Some(detail.to_string());
    }
}

#[async_trait]
impl DnsVerifier for MockDnsVerifier {
    #[allow(clippy::unwrap_used)]
    async fn verify_domain(
        &self,
        domain: &str,
        _expected: &ExpectedRecords,
    ) -> CoreResult<DnsVerificationReport> {
        if let Some(detail) = self.unreachable.read().unwrap().clone() {
            return Err(VerifierError::NetworkError(detail).into());
        }

        let results = self.results.read().unwrap();
        let checks = DnsCheckKind::ALL
            .into_iter()
            .map(|kind| {
                let check = results.get(&kind).cloned().unwrap_or(RecordCheck {
                    status: CheckStatus::Fail,
                    message: "No record found".to_string(),
                    found: Vec::new(),
                });
                (kind, check)
            })
            .collect();

        Ok(DnsVerificationReport {
            domain: domain.to_string(),
            checks,
        })
    }
}

// ===== Factory methods =====

/// Create a `WizardService` wired to mocks, plus handles to the mocks.
pub fn create_test_wizard_service() -> (
    WizardService,
    Arc<MockDomainRegistry>,
    Arc<MockDnsVerifier>,
) {
    let registry = Arc::new(MockDomainRegistry::new());
    let verifier = Arc::new(MockDnsVerifier::new());

    let ctx = Arc::new(ServiceContext::new(
        registry.clone(),
        verifier.clone(),
        WizardConfig::new("1.2.3.4"),
    ));

    (WizardService::new(ctx), registry, verifier)
}
