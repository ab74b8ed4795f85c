//! Client library for the terms and conditions service.
//!
//! The service stores versioned text documents ("terms") addressed by
//! owner, name and revision, records user agreement to them, and lets
//! owners publish (release) revisions.
//!
//! # Quick Start
//!
//! ```rust
//! use terms_client::TermId;
//!
//! let id: TermId = "tenant:owner/my-terms/3".parse().unwrap();
//! assert_eq!(id.tenant, "tenant");
//! assert_eq!(id.owner, "owner");
//! assert_eq!(id.name, "my-terms");
//! assert_eq!(id.revision, 3);
//! assert_eq!(id.to_string(), "tenant:owner/my-terms/3");
//!
//! // A numeric second segment is a revision, anything else is a name.
//! let id = TermId::parse("my-terms/3").unwrap();
//! assert_eq!((id.owner.as_str(), id.revision), ("", 3));
//! let id = TermId::parse("owner/my-terms").unwrap();
//! assert_eq!((id.owner.as_str(), id.revision), ("owner", 0));
//! ```
//!
//! # Modules
//!
//! - [`term`]: Term id parsing, validation and canonical form
//! - [`api`]: Terms service client
//! - [`identity`]: Identity manager lookups
//! - [`wireformat`]: JSON wire types
//! - [`transport`]: HTTP transport abstraction
//! - [`config`]: Service locations and cookie file
//! - [`cookies`]: Persistent cookie jar
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod identity;
pub mod term;
pub mod transport;
pub mod wireformat;

// Re-export commonly used types at crate root
pub use api::{Client, ClientBuilder, TermsApi};
pub use cookies::CookieJar;
pub use error::{ApiError, TermIdError};
pub use identity::{IdentityApi, IdentityClient};
pub use term::{parse_term, validate_owner, validate_term_name, TermId};
pub use wireformat::{
    Agreement, CheckAgreementsRequest, GetTermsResponse, SaveAgreement, SaveAgreementResponses,
    SaveAgreements, Term,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
