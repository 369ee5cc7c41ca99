//! Registry-facing type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A receiving-domain row as stored by the registry.
///
/// `name` is kept in address-suffix form with a leading `@` (e.g.
/// `@example.com`), matching how addresses are matched at delivery time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Domain ID.
    pub id: String,
    /// Domain name in `@domain.tld` form.
    pub name: String,
    /// Only paying-tier users may create addresses under this domain.
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
    /// Whether the domain accepts mail. Created `false`, flipped by the
    /// wizard's activate step.
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Request to create a domain row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDomainRequest {
    /// Domain name in `@domain.tld` form.
    pub name: String,
    /// Premium-only flag attached at creation time.
    #[serde(rename = "isPremium")]
    pub is_premium: bool,
}

impl CreateDomainRequest {
    /// Build a creation request.
    #[must_use]
    pub fn new(name: impl Into<String>, is_premium: bool) -> Self {
        Self {
            name: name.into(),
            is_premium,
        }
    }
}

/// Partial update of a domain row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainPatch {
    /// New active flag.
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// New premium-only flag.
    #[serde(rename = "isPremium", skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
}

impl DomainPatch {
    /// Patch that activates a domain.
    #[must_use]
    pub fn activate() -> Self {
        Self {
            is_active: Some(true),
            ..Self::default()
        }
    }

    /// Whether the patch contains no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.is_premium.is_none()
    }
}
