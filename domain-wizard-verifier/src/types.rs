//! Public types returned by verification operations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four DNS checks run against a mail domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsCheckKind {
    /// Mail exchange record routing inbound mail.
    Mx,
    /// Sender Policy Framework TXT record at the apex.
    Spf,
    /// DomainKeys Identified Mail public key record.
    Dkim,
    /// Domain-based Message Authentication policy record.
    Dmarc,
}

impl DnsCheckKind {
    /// All checks in wizard order.
    pub const ALL: [Self; 4] = [Self::Mx, Self::Spf, Self::Dkim, Self::Dmarc];
}

impl fmt::Display for DnsCheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mx => write!(f, "mx"),
            Self::Spf => write!(f, "spf"),
            Self::Dkim => write!(f, "dkim"),
            Self::Dmarc => write!(f, "dmarc"),
        }
    }
}

impl FromStr for DnsCheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mx" => Ok(Self::Mx),
            "spf" => Ok(Self::Spf),
            "dkim" => Ok(Self::Dkim),
            "dmarc" => Ok(Self::Dmarc),
            _ => Err(format!("Unsupported DNS check kind: {s}")),
        }
    }
}

/// Grade of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The expected record was found.
    Pass,
    /// The record is missing or wrong.
    Fail,
    /// A record exists but is weaker than expected (e.g. `p=none` DMARC).
    Warning,
}

/// Result of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCheck {
    /// Grade.
    pub status: CheckStatus,
    /// Human-readable explanation shown to the administrator.
    pub message: String,
    /// Record values found in DNS, for display.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub found: Vec<String>,
}

impl RecordCheck {
    pub(crate) fn pass(message: impl Into<String>, found: Vec<String>) -> Self {
        Self {
            status: CheckStatus::Pass,
            message: message.into(),
            found,
        }
    }

    pub(crate) fn fail(message: impl Into<String>, found: Vec<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            message: message.into(),
            found,
        }
    }

    pub(crate) fn warning(message: impl Into<String>, found: Vec<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            message: message.into(),
            found,
        }
    }
}

/// Record set the mail platform expects a domain to publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedRecords {
    /// Exchange host the MX record must point at (e.g. `mail.example.com`).
    #[serde(rename = "mxHost")]
    pub mx_host: String,
    /// Mail server IP the SPF record must authorize.
    #[serde(rename = "serverIp")]
    pub server_ip: String,
    /// DKIM selector to look up under `_domainkey`.
    #[serde(rename = "dkimSelector")]
    pub dkim_selector: String,
}

impl ExpectedRecords {
    /// Expected record set with the default `default` DKIM selector.
    #[must_use]
    pub fn new(mx_host: impl Into<String>, server_ip: impl Into<String>) -> Self {
        Self {
            mx_host: mx_host.into(),
            server_ip: server_ip.into(),
            dkim_selector: "default".to_string(),
        }
    }
}

/// Aggregated verification result for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsVerificationReport {
    /// Domain the checks ran against.
    pub domain: String,
    /// One entry per [`DnsCheckKind`].
    pub checks: HashMap<DnsCheckKind, RecordCheck>,
}

impl DnsVerificationReport {
    /// Look up a single check result.
    #[must_use]
    pub fn check(&self, kind: DnsCheckKind) -> Option<&RecordCheck> {
        self.checks.get(&kind)
    }
}
