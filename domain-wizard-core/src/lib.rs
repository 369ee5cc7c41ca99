//! Domain Setup Wizard Core Library
//!
//! Provides the business logic for onboarding a mail-receiving domain:
//! - Wizard session state machine (domain → mx → spf → dkim → dmarc → review)
//! - Domain name normalization and validation
//! - Expected DNS record templating (MX, SPF, DKIM, DMARC)
//! - Verification and activation orchestration (Wizard Service)
//!
//! This library is platform-independent: the registry backend and the DNS
//! verifier are injected through traits, so desktop, web, and test harness
//! front-ends all drive the same transition logic.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ServiceContext, WizardService};
pub use traits::{DnsVerifier, ResolverDnsVerifier};
pub use types::{
    ActionState, DnsRecordTemplate, StepStatus, WizardConfig, WizardSession, WizardStep,
};
