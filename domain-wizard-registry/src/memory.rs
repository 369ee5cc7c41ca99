//! In-memory domain registry.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{RegistryError, Result};
use crate::traits::DomainRegistry;
use crate::types::{CreateDomainRequest, DomainPatch, DomainRecord};

/// Process-local registry backend.
///
/// Default implementation, used in tests and demos; rows do not survive the
/// process.
#[derive(Default)]
pub struct InMemoryDomainRegistry {
    domains: RwLock<HashMap<String, DomainRecord>>,
}

impl InMemoryDomainRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DomainRegistry for InMemoryDomainRegistry {
    async fn add_domain(&self, request: &CreateDomainRequest) -> Result<DomainRecord> {
        if request.name.is_empty() {
            return Err(RegistryError::InvalidParameter {
                param: "name".to_string(),
                detail: "domain name is required".to_string(),
            });
        }

        let mut store = self.domains.write().await;
        if store.values().any(|d| d.name == request.name) {
            return Err(RegistryError::DomainExists {
                domain: request.name.clone(),
                raw_message: None,
            });
        }

        let now = Utc::now();
        let record = DomainRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            is_premium: request.is_premium,
            is_active: false,
            created_at: now,
            updated_at: now,
        };
        store.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update_domain(&self, domain_id: &str, patch: &DomainPatch) -> Result<DomainRecord> {
        if patch.is_empty() {
            return Err(RegistryError::InvalidParameter {
                param: "patch".to_string(),
                detail: "patch contains no changes".to_string(),
            });
        }

        let mut store = self.domains.write().await;
        let record = store
            .get_mut(domain_id)
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain_id: domain_id.to_string(),
                raw_message: None,
            })?;

        if let Some(is_active) = patch.is_active {
            record.is_active = is_active;
        }
        if let Some(is_premium) = patch.is_premium {
            record.is_premium = is_premium;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn get_domain(&self, domain_id: &str) -> Result<DomainRecord> {
        self.domains
            .read()
            .await
            .get(domain_id)
            .cloned()
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain_id: domain_id.to_string(),
                raw_message: None,
            })
    }

    async fn list_domains(&self) -> Result<Vec<DomainRecord>> {
        let mut domains: Vec<DomainRecord> = self.domains.read().await.values().cloned().collect();
        domains.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(domains)
    }

    async fn delete_domain(&self, domain_id: &str) -> Result<()> {
        let removed = self.domains.write().await.remove(domain_id);
        if removed.is_none() {
            return Err(RegistryError::DomainNotFound {
                domain_id: domain_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}
