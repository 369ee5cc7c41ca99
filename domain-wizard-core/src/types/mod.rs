//! Wizard type definitions

mod config;
mod records;
mod wizard;

pub use config::WizardConfig;
pub use records::{expected_dns_records, DnsRecordTemplate, DnsRecordType, MX_PRIORITY};
pub use wizard::{ActionState, CheckStatuses, StepStatus, WizardSession, WizardStep};
