//! PostgREST-backed domain registry.

mod http;
mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{RegistryError, Result};
use crate::traits::DomainRegistry;
use crate::types::{CreateDomainRequest, DomainPatch, DomainRecord};

use types::{CreateDomainRow, DomainRow, PatchRow};

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Table holding the receiving-domain rows.
const DOMAINS_TABLE: &str = "domains";

/// Registry backend speaking a PostgREST-style HTTP API.
///
/// `base_url` points at the REST root (e.g. `https://host/rest/v1`); the
/// API key is sent both as `apikey` and as a bearer token.
pub struct RestDomainRegistry {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl RestDomainRegistry {
    /// Build a registry client with default timeouts.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RegistryError::NetworkError {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl DomainRegistry for RestDomainRegistry {
    async fn add_domain(&self, request: &CreateDomainRequest) -> Result<DomainRecord> {
        if request.name.is_empty() {
            return Err(RegistryError::InvalidParameter {
                param: "name".to_string(),
                detail: "domain name is required".to_string(),
            });
        }

        let row = CreateDomainRow::from(request);
        let rows: Vec<DomainRow> = self
            .post(DOMAINS_TABLE, &row, Some(&request.name))
            .await?;
        rows.into_iter()
            .next()
            .map(DomainRecord::from)
            .ok_or_else(|| RegistryError::ParseError {
                detail: "insert returned no representation".to_string(),
            })
    }

    async fn update_domain(&self, domain_id: &str, patch: &DomainPatch) -> Result<DomainRecord> {
        if patch.is_empty() {
            return Err(RegistryError::InvalidParameter {
                param: "patch".to_string(),
                detail: "patch contains no changes".to_string(),
            });
        }

        let path = format!("{DOMAINS_TABLE}?id=eq.{domain_id}");
        let rows: Vec<DomainRow> = self
            .patch(&path, &PatchRow::from(patch), Some(domain_id))
            .await?;
        rows.into_iter()
            .next()
            .map(DomainRecord::from)
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain_id: domain_id.to_string(),
                raw_message: None,
            })
    }

    async fn get_domain(&self, domain_id: &str) -> Result<DomainRecord> {
        let path = format!("{DOMAINS_TABLE}?id=eq.{domain_id}");
        let rows: Vec<DomainRow> = self.get(&path, Some(domain_id)).await?;
        rows.into_iter()
            .next()
            .map(DomainRecord::from)
            .ok_or_else(|| RegistryError::DomainNotFound {
                domain_id: domain_id.to_string(),
                raw_message: None,
            })
    }

    async fn list_domains(&self) -> Result<Vec<DomainRecord>> {
        let path = format!("{DOMAINS_TABLE}?order=created_at.desc");
        let rows: Vec<DomainRow> = self.get(&path, None).await?;
        Ok(rows.into_iter().map(DomainRecord::from).collect())
    }

    async fn delete_domain(&self, domain_id: &str) -> Result<()> {
        let path = format!("{DOMAINS_TABLE}?id=eq.{domain_id}");
        let rows: Vec<DomainRow> = self.delete(&path, Some(domain_id)).await?;
        confirm_deleted(&rows, domain_id)
    }
}

/// A DELETE that matched no rows still returns 2xx; an empty representation
/// means the id did not exist, matching the in-memory backend's contract.
fn confirm_deleted(rows: &[DomainRow], domain_id: &str) -> Result<()> {
    if rows.is_empty() {
        return Err(RegistryError::DomainNotFound {
            domain_id: domain_id.to_string(),
            raw_message: None,
        });
    }
    Ok(())
}
