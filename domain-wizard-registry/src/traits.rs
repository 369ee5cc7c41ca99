//! Domain registry trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreateDomainRequest, DomainPatch, DomainRecord};

/// Remote registry of receiving domains.
///
/// The wizard only needs [`add_domain`](Self::add_domain) and
/// [`update_domain`](Self::update_domain); the remaining methods back the
/// domain listing of the admin panel.
#[async_trait]
pub trait DomainRegistry: Send + Sync {
    /// Create a domain row. The row starts inactive.
    ///
    /// Fails with [`RegistryError::DomainExists`](crate::RegistryError::DomainExists)
    /// if a row with the same name already exists.
    async fn add_domain(&self, request: &CreateDomainRequest) -> Result<DomainRecord>;

    /// Apply a partial update to a domain row and return the updated row.
    async fn update_domain(&self, domain_id: &str, patch: &DomainPatch) -> Result<DomainRecord>;

    /// Fetch a single domain row by ID.
    async fn get_domain(&self, domain_id: &str) -> Result<DomainRecord>;

    /// List all domain rows, newest first.
    async fn list_domains(&self) -> Result<Vec<DomainRecord>>;

    /// Delete a domain row.
    async fn delete_domain(&self, domain_id: &str) -> Result<()>;
}
