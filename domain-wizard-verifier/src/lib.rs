//! # domain-wizard-verifier
//!
//! Live DNS verification for mail-receiving domains. Given a bare domain
//! name and the record set the mail platform expects, resolves the relevant
//! MX/TXT records and grades each of the four checks (`mx`, `spf`, `dkim`,
//! `dmarc`) as pass, fail, or warning with a human-readable message.
//!
//! All functionality is stateless; the resolver uses the host system DNS
//! configuration.
//!
//! ```rust,no_run
//! use domain_wizard_verifier::{ExpectedRecords, VerificationService};
//! # async fn demo() -> domain_wizard_verifier::VerifierResult<()> {
//! let expected = ExpectedRecords::new("mail.example.com", "203.0.113.10");
//! let report = VerificationService::verify_domain("example.com", &expected).await?;
//! for (kind, check) in &report.checks {
//!     println!("{kind}: {:?} ({})", check.status, check.message);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod services;
mod types;

pub use error::{VerifierError, VerifierResult};
pub use services::VerificationService;
pub use types::{
    CheckStatus, DnsCheckKind, DnsVerificationReport, ExpectedRecords, RecordCheck,
};
