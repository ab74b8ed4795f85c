//! Error types for term id parsing and the terms service client.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Error while parsing or validating a term id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermIdError {
    // === Malformed identifier ===
    #[error("unknown term id format {input:?}")]
    UnknownFormat { input: String },

    #[error("invalid revision number {token:?} {error}")]
    InvalidRevisionNumber { token: String, error: ParseIntError },

    // === Grammar violations ===
    #[error("wrong term tenant format {tenant:?}")]
    InvalidTenant { tenant: String },

    #[error("wrong owner format {owner:?}")]
    InvalidOwner { owner: String },

    #[error("wrong term name format {name:?}")]
    InvalidName { name: String },

    #[error("negative term revision")]
    NegativeRevision,
}

/// Error returned by the terms and identity service clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot parse {url:?}: {error}")]
    UrlParse { url: String, error: url::ParseError },

    #[error("empty term name")]
    EmptyTermName,

    #[error("term not found")]
    TermNotFound,

    /// Error text reported by the service in a non-2xx response.
    #[error("{0}")]
    Service(String),

    /// Non-2xx response from an agreement endpoint.
    #[error("{context}: {reason}: {body}")]
    Request {
        context: &'static str,
        reason: String,
        body: String,
    },

    #[error("cannot encode request")]
    Encode(#[source] serde_json::Error),

    #[error("cannot decode response")]
    Decode(#[source] serde_json::Error),

    #[error("http transport failed")]
    Transport(#[from] reqwest::Error),

    // === Cookie jar ===
    #[error("cannot load cookies from {path:?}")]
    CookieLoad {
        path: PathBuf,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot save cookies to {path:?}")]
    CookieSave {
        path: PathBuf,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}
