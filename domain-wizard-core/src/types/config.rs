//! Mail platform configuration consumed by the wizard.

use domain_wizard_verifier::ExpectedRecords;
use serde::{Deserialize, Serialize};

fn default_mail_subdomain() -> String {
    "mail".to_string()
}

fn default_dkim_selector() -> String {
    "default".to_string()
}

fn default_dmarc_policy() -> String {
    "quarantine".to_string()
}

/// Static facts about the mail platform that the expected DNS records are
/// derived from. Injected once at startup; the wizard never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Public IP of the inbound mail server (used in the SPF mechanism).
    #[serde(rename = "serverIp")]
    pub server_ip: String,
    /// Subdomain the MX record must point at (`mail` → `mail.<domain>`).
    #[serde(rename = "mailSubdomain", default = "default_mail_subdomain")]
    pub mail_subdomain: String,
    /// DKIM selector published under `_domainkey`.
    #[serde(rename = "dkimSelector", default = "default_dkim_selector")]
    pub dkim_selector: String,
    /// DKIM public key, once the platform has generated one for the domain.
    /// `None` renders a placeholder in the record template.
    #[serde(rename = "dkimPublicKey", default)]
    pub dkim_public_key: Option<String>,
    /// DMARC policy requested from receivers.
    #[serde(rename = "dmarcPolicy", default = "default_dmarc_policy")]
    pub dmarc_policy: String,
}

impl WizardConfig {
    /// Configuration with platform defaults for everything but the server IP.
    #[must_use]
    pub fn new(server_ip: impl Into<String>) -> Self {
        Self {
            server_ip: server_ip.into(),
            mail_subdomain: default_mail_subdomain(),
            dkim_selector: default_dkim_selector(),
            dkim_public_key: None,
            dmarc_policy: default_dmarc_policy(),
        }
    }

    /// Exchange host the MX record must point at, e.g. `mail.example.com`.
    #[must_use]
    pub fn mx_exchange(&self, domain: &str) -> String {
        format!("{}.{domain}", self.mail_subdomain)
    }

    /// SPF TXT value authorizing the mail server.
    #[must_use]
    pub fn spf_value(&self) -> String {
        format!("v=spf1 ip4:{} a mx ~all", self.server_ip)
    }

    /// DKIM TXT value (placeholder key until one has been generated).
    #[must_use]
    pub fn dkim_value(&self) -> String {
        let key = self.dkim_public_key.as_deref().unwrap_or("<public-key>");
        format!("v=DKIM1; k=rsa; p={key}")
    }

    /// DMARC TXT value with aggregate reports routed to the postmaster.
    #[must_use]
    pub fn dmarc_value(&self, domain: &str) -> String {
        format!(
            "v=DMARC1; p={}; rua=mailto:postmaster@{domain}",
            self.dmarc_policy
        )
    }

    /// Record set handed to the DNS verifier for a domain.
    #[must_use]
    pub fn expected_records(&self, domain: &str) -> ExpectedRecords {
        ExpectedRecords {
            mx_host: self.mx_exchange(domain),
            server_ip: self.server_ip.clone(),
            dkim_selector: self.dkim_selector.clone(),
        }
    }
}
