//! Identity manager lookups.
//!
//! Listing terms needs the current user's name and the public groups the
//! user belongs to.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use tracing::debug;

use crate::api::service_error;
use crate::config;
use crate::error::ApiError;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Identity manager queries.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Returns the name of the authenticated user.
    async fn whoami(&self) -> Result<String, ApiError>;

    /// Returns the public groups `username` belongs to.
    async fn groups(&self, username: &str) -> Result<Vec<String>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct WhoAmIResponse {
    user: String,
}

/// Identity manager client.
#[derive(Debug)]
pub struct IdentityClient<T = ReqwestTransport> {
    identity_url: String,
    transport: T,
}

impl IdentityClient<ReqwestTransport> {
    /// Creates a client for the configured identity manager.
    pub fn new() -> Result<Self, ApiError> {
        Ok(Self::with_transport(
            config::identity_url(),
            ReqwestTransport::new()?,
        ))
    }
}

impl<T: Transport> IdentityClient<T> {
    pub fn with_transport(identity_url: impl Into<String>, transport: T) -> Self {
        Self {
            identity_url: identity_url.into(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get<R: serde::de::DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let raw = format!("{}/{}", self.identity_url.trim_end_matches('/'), path);
        let url = Url::parse(&raw).map_err(|error| ApiError::UrlParse { url: raw, error })?;
        debug!(url = %url, "identity lookup");

        let response = self
            .transport
            .send(HttpRequest::new(Method::GET, url))
            .await?;
        if !response.is_success() {
            return Err(service_error(&response));
        }
        serde_json::from_slice(&response.body).map_err(ApiError::Decode)
    }
}

#[async_trait]
impl<T: Transport> IdentityApi for IdentityClient<T> {
    async fn whoami(&self) -> Result<String, ApiError> {
        let response: WhoAmIResponse = self.get("whoami").await?;
        Ok(response.user)
    }

    async fn groups(&self, username: &str) -> Result<Vec<String>, ApiError> {
        self.get(&format!("u/{username}/groups")).await
    }
}
