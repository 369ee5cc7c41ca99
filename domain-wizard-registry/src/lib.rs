//! # domain-wizard-registry
//!
//! Abstraction over the receiving-domain registry used by the temp-mail
//! admin back-office. A *receiving domain* is a domain the mail platform
//! accepts catch-all traffic for; rows live in a remote registry and are
//! created inactive, then flipped active once DNS has been set up.
//!
//! Two backends are provided:
//!
//! - [`RestDomainRegistry`] — talks to a PostgREST-style HTTP API.
//! - [`InMemoryDomainRegistry`] — process-local map, used as the default
//!   backend in tests and demos.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_wizard_registry::{CreateDomainRequest, DomainRegistry, InMemoryDomainRegistry};
//!
//! #[tokio::main]
//! async fn main() -> domain_wizard_registry::Result<()> {
//!     let registry = InMemoryDomainRegistry::new();
//!     let domain = registry
//!         .add_domain(&CreateDomainRequest::new("@example.com", false))
//!         .await?;
//!     println!("{} ({})", domain.name, domain.id);
//!     Ok(())
//! }
//! ```

mod error;
mod memory;
mod rest;
mod traits;
mod types;

pub use error::{RegistryError, Result};
pub use memory::InMemoryDomainRegistry;
pub use rest::RestDomainRegistry;
pub use traits::DomainRegistry;
pub use types::{CreateDomainRequest, DomainPatch, DomainRecord};
