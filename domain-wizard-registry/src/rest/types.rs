//! Wire types for the PostgREST backend (snake_case table columns).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CreateDomainRequest, DomainPatch, DomainRecord};

/// Row shape of the `domains` table.
#[derive(Debug, Deserialize)]
pub(crate) struct DomainRow {
    pub id: String,
    pub name: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DomainRow> for DomainRecord {
    fn from(row: DomainRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            is_premium: row.is_premium,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert body for the `domains` table.
#[derive(Debug, Serialize)]
pub(crate) struct CreateDomainRow<'a> {
    pub name: &'a str,
    pub is_premium: bool,
}

impl<'a> From<&'a CreateDomainRequest> for CreateDomainRow<'a> {
    fn from(request: &'a CreateDomainRequest) -> Self {
        Self {
            name: &request.name,
            is_premium: request.is_premium,
        }
    }
}

/// Update body for the `domains` table.
#[derive(Debug, Serialize)]
pub(crate) struct PatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
}

impl From<&DomainPatch> for PatchRow {
    fn from(patch: &DomainPatch) -> Self {
        Self {
            is_active: patch.is_active,
            is_premium: patch.is_premium,
        }
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
