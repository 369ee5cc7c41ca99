//! Expected DNS record templating.
//!
//! The templates are pure functions of the domain name and the platform
//! configuration; nothing here is stored. They are what the administrator
//! copies into their DNS provider before hitting "Verify".

use serde::{Deserialize, Serialize};

use super::config::WizardConfig;

/// MX preference rendered in the template.
pub const MX_PRIORITY: u16 = 10;

/// Record types the wizard asks the administrator to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
}

/// A single record the administrator must create, in the relative-host form
/// DNS provider UIs use (`@` for the apex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordTemplate {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Host field, relative to the domain.
    pub host: String,
    /// Value field.
    pub value: String,
    /// MX preference; `None` for TXT records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// All four records for a domain, in wizard step order.
#[must_use]
pub fn expected_dns_records(domain: &str, config: &WizardConfig) -> Vec<DnsRecordTemplate> {
    vec![
        DnsRecordTemplate {
            record_type: DnsRecordType::Mx,
            host: "@".to_string(),
            value: config.mx_exchange(domain),
            priority: Some(MX_PRIORITY),
        },
        DnsRecordTemplate {
            record_type: DnsRecordType::Txt,
            host: "@".to_string(),
            value: config.spf_value(),
            priority: None,
        },
        DnsRecordTemplate {
            record_type: DnsRecordType::Txt,
            host: format!("{}._domainkey", config.dkim_selector),
            value: config.dkim_value(),
            priority: None,
        },
        DnsRecordTemplate {
            record_type: DnsRecordType::Txt,
            host: "_dmarc".to_string(),
            value: config.dmarc_value(domain),
            priority: None,
        },
    ]
}
