//! Terms service API client.
//!
//! [`TermsApi`] is the interface used by the command line tool; [`Client`]
//! implements it over any [`Transport`].
//!
//! ```no_run
//! use terms_client::api::{ClientBuilder, TermsApi};
//!
//! # async fn example() -> Result<(), terms_client::ApiError> {
//! let client = ClientBuilder::new()
//!     .service_url("https://api.jujucharms.com/terms")
//!     .build()?;
//! let term = client.get_term("owner", "my-terms", 0).await?;
//! println!("{} revision {}", term.name, term.revision);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::config;
use crate::cookies::CookieJar;
use crate::error::ApiError;
use crate::transport::{
    DEFAULT_TIMEOUT, HttpRequest, HttpResponse, REQUEST_ID_HEADER, ReqwestTransport, Transport,
};
use crate::wireformat::{
    Agreement, CheckAgreementsRequest, ErrorResponse, GetTermsResponse, SaveAgreementResponses,
    SaveAgreements, SaveTerm, Term, TermIdResponse,
};

/// Operations offered by the terms service.
#[async_trait]
pub trait TermsApi: Send + Sync {
    /// Saves a new revision of the document `owner/name` and returns the id
    /// of the saved term. An empty owner saves an ownerless term.
    async fn save_term(&self, owner: &str, name: &str, content: &str) -> Result<String, ApiError>;

    /// Returns the matching term. A revision of 0 selects the latest one.
    async fn get_term(&self, owner: &str, name: &str, revision: i64) -> Result<Term, ApiError>;

    /// Publishes an owned term revision and returns the published id.
    /// Ownerless terms need no publishing.
    async fn publish(&self, owner: &str, name: &str, revision: i64) -> Result<String, ApiError>;

    /// Returns all terms owned by a user or group.
    async fn get_terms_by_owner(&self, owner: &str) -> Result<Vec<Term>, ApiError>;

    /// Returns the listed terms the current user has not agreed to.
    async fn get_unsigned_terms(
        &self,
        request: &CheckAgreementsRequest,
    ) -> Result<Vec<GetTermsResponse>, ApiError>;

    /// Records agreements of the current user.
    async fn save_agreement(
        &self,
        agreements: &SaveAgreements,
    ) -> Result<SaveAgreementResponses, ApiError>;

    /// Returns every agreement the current user has made.
    async fn get_users_agreements(&self) -> Result<Vec<Agreement>, ApiError>;
}

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    service_url: Option<String>,
    timeout: Duration,
    request_id: Option<String>,
    cookie_jar: Option<CookieJar>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            service_url: None,
            timeout: DEFAULT_TIMEOUT,
            request_id: None,
            cookie_jar: None,
        }
    }

    /// Sets the service location. Defaults to [`config::terms_url`].
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends a fixed `X-Request-ID` instead of a fresh UUID per request.
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Uses `jar` for cookies instead of a private in-memory jar.
    pub fn cookie_jar(mut self, jar: CookieJar) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Builds a client over reqwest.
    pub fn build(mut self) -> Result<Client<ReqwestTransport>, ApiError> {
        let jar = self.cookie_jar.take().unwrap_or_default();
        let transport = ReqwestTransport::with_cookies(self.timeout, &jar)?;
        Ok(self.build_with_transport(transport))
    }

    /// Builds a client over a custom transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Client<T> {
        Client {
            service_url: self.service_url.unwrap_or_else(config::terms_url),
            request_id: self.request_id,
            transport,
        }
    }
}

/// Terms service client.
#[derive(Debug)]
pub struct Client<T = ReqwestTransport> {
    service_url: String,
    request_id: Option<String>,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client for the configured service location.
    pub fn new() -> Result<Self, ApiError> {
        ClientBuilder::new().build()
    }
}

impl<T: Transport> Client<T> {
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request_id = self
            .request_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        debug!(
            method = %request.method,
            url = %request.url,
            request_id = %request_id,
            "sending request"
        );
        let request = request.header(REQUEST_ID_HEADER, &request_id);
        self.transport.send(request).await
    }

    /// Sends a term endpoint request, decoding a non-2xx body as the
    /// service's error text.
    async fn call<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(service_error(&response));
        }
        decode(&response)
    }

    /// Sends an agreement endpoint request, reporting non-2xx responses
    /// under `context`.
    async fn call_with_context<R: DeserializeOwned>(
        &self,
        request: HttpRequest,
        context: &'static str,
    ) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(ApiError::Request {
                context,
                reason: response
                    .status
                    .canonical_reason()
                    .unwrap_or(response.status.as_str())
                    .to_string(),
                body: response.text(),
            });
        }
        decode(&response)
    }

    fn v1_url(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.service_url).map_err(|error| ApiError::UrlParse {
            url: self.service_url.clone(),
            error,
        })?;
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}/v1/{}", path.trim_start_matches('/')));
        Ok(url)
    }
}

#[async_trait]
impl<T: Transport> TermsApi for Client<T> {
    async fn save_term(&self, owner: &str, name: &str, content: &str) -> Result<String, ApiError> {
        let url = term_url(self.v1_url("terms")?, owner, name, 0)?;
        let body = serde_json::to_vec(&SaveTerm {
            content: content.to_string(),
        })
        .map_err(ApiError::Encode)?;

        let saved: TermIdResponse = self
            .call(HttpRequest::new(Method::POST, url).json_body(body))
            .await?;
        Ok(saved.term_id)
    }

    async fn get_term(&self, owner: &str, name: &str, revision: i64) -> Result<Term, ApiError> {
        let url = term_url(self.v1_url("terms")?, owner, name, revision)?;
        let terms: Vec<Term> = self.call(HttpRequest::new(Method::GET, url)).await?;
        terms.into_iter().next().ok_or(ApiError::TermNotFound)
    }

    async fn publish(&self, owner: &str, name: &str, revision: i64) -> Result<String, ApiError> {
        if owner.is_empty() {
            return Ok(format!("{name}/{revision}"));
        }
        let url = self.v1_url(&format!("terms/{owner}/{name}/{revision}/publish"))?;
        let published: TermIdResponse = self.call(HttpRequest::new(Method::POST, url)).await?;
        Ok(published.term_id)
    }

    async fn get_terms_by_owner(&self, owner: &str) -> Result<Vec<Term>, ApiError> {
        let url = self.v1_url(&format!("g/{owner}"))?;
        self.call(HttpRequest::new(Method::GET, url)).await
    }

    async fn get_unsigned_terms(
        &self,
        request: &CheckAgreementsRequest,
    ) -> Result<Vec<GetTermsResponse>, ApiError> {
        let mut url = self.v1_url("agreement")?;
        if !request.terms.is_empty() {
            let mut query = url.query_pairs_mut();
            for term in &request.terms {
                query.append_pair("Terms", term);
            }
        }
        self.call_with_context(
            HttpRequest::new(Method::GET, url),
            "failed to get unsigned terms",
        )
        .await
    }

    async fn save_agreement(
        &self,
        agreements: &SaveAgreements,
    ) -> Result<SaveAgreementResponses, ApiError> {
        let url = self.v1_url("agreement")?;
        let body = serde_json::to_vec(agreements).map_err(ApiError::Encode)?;
        self.call_with_context(
            HttpRequest::new(Method::POST, url).json_body(body),
            "failed to save agreement",
        )
        .await
    }

    async fn get_users_agreements(&self) -> Result<Vec<Agreement>, ApiError> {
        let url = self.v1_url("agreements")?;
        self.call_with_context(
            HttpRequest::new(Method::GET, url),
            "failed to get signed agreements",
        )
        .await
    }
}

/// Appends `[owner/]name` to a terms collection URL, with an optional
/// `revision` query.
fn term_url(mut url: Url, owner: &str, name: &str, revision: i64) -> Result<Url, ApiError> {
    if name.is_empty() {
        return Err(ApiError::EmptyTermName);
    }
    let mut path = url.path().trim_end_matches('/').to_string();
    if !owner.is_empty() {
        path.push('/');
        path.push_str(owner.trim_start_matches('/'));
    }
    path.push('/');
    path.push_str(name.trim_start_matches('/'));
    url.set_path(&path);

    if revision != 0 {
        url.query_pairs_mut()
            .append_pair("revision", &revision.to_string());
    }
    Ok(url)
}

/// Error text of a failed request: the JSON `error` or `message` field, or
/// the raw body when neither is present.
pub(crate) fn service_error(response: &HttpResponse) -> ApiError {
    let text = serde_json::from_slice::<ErrorResponse>(&response.body)
        .map(ErrorResponse::into_text)
        .unwrap_or_default();
    if text.is_empty() {
        ApiError::Service(response.text())
    } else {
        ApiError::Service(text)
    }
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}
