//! Authenticated session
//!
//! A [`Session`] is the result of authentication: the storage base URI, the
//! token header, and the transport settings every request inherits. It is
//! never mutated once built; per-request headers go on the request builder.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use swc_core::{ContainerInfo, Error, Result, join_path};
use tracing::{debug, instrument};

use crate::container::ContainerScope;

/// Timeout applied when the caller does not choose one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Token header sent with every storage request
pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// Authenticated handle on a Swift account
#[derive(Debug, Clone)]
pub struct Session {
    base_uri: String,
    auth_headers: HeaderMap,
    tls_verify: bool,
    timeout: Duration,
    http: Client,
}

impl Session {
    /// Build a session from a token and storage URL
    pub fn new(
        base_uri: impl Into<String>,
        token: &str,
        tls_verify: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let mut value = HeaderValue::from_str(token)
            .map_err(|_| Error::Auth("token contains invalid header characters".into()))?;
        value.set_sensitive(true);

        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(X_AUTH_TOKEN, value);

        Ok(Self {
            base_uri: base_uri.into(),
            auth_headers,
            tls_verify,
            timeout,
            http: http_client(tls_verify)?,
        })
    }

    /// Storage URL of the account
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Auth token; empty when the server did not issue one
    pub fn token(&self) -> &str {
        self.auth_headers
            .get(X_AUTH_TOKEN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Headers every request carries
    pub fn auth_headers(&self) -> &HeaderMap {
        &self.auth_headers
    }

    /// Whether TLS certificates are verified
    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Copy of this session with a different timeout
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    /// Copy of this session with a different TLS verification setting
    pub fn with_tls_verify(&self, tls_verify: bool) -> Result<Self> {
        if tls_verify == self.tls_verify {
            return Ok(self.clone());
        }
        Ok(Self {
            tls_verify,
            http: http_client(tls_verify)?,
            ..self.clone()
        })
    }

    /// Scope operations to a container
    pub fn container(&self, name: impl Into<String>) -> Result<ContainerScope<'_>> {
        ContainerScope::new(self, name.into())
    }

    /// List the containers of the account
    #[instrument(skip(self), fields(base_uri = %self.base_uri))]
    pub async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let request = self
            .request(Method::GET, &self.base_uri)
            .query(&[("format", "json")]);
        let response = send(request).await?;
        decode_listing(response, "account").await
    }

    /// Request carrying the session headers and timeout
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "composing request");
        self.http
            .request(method, url)
            .headers(self.auth_headers.clone())
            .timeout(self.timeout)
    }

    /// URL of a resource below the account
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let mut all = Vec::with_capacity(segments.len() + 1);
        all.push(self.base_uri.as_str());
        all.extend(segments.iter().map(AsRef::as_ref));
        join_path(&all)
    }
}

pub(crate) fn http_client(tls_verify: bool) -> Result<Client> {
    Client::builder()
        .danger_accept_invalid_certs(!tls_verify)
        .build()
        .map_err(Error::transport)
}

/// Send a request, keeping the HTTP client's error as the source
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(Error::transport)?;
    debug!(status = response.status().as_u16(), url = %response.url(), "response");
    Ok(response)
}

/// Read the body as raw bytes
pub(crate) async fn body_bytes(response: Response) -> Result<Vec<u8>> {
    Ok(response.bytes().await.map_err(Error::transport)?.to_vec())
}

/// Map an unexpected status to an error
pub(crate) fn status_error(status: StatusCode, what: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(what.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::Auth(format!("{what}: HTTP {}", status.as_u16()))
        }
        StatusCode::CONFLICT => Error::Conflict(what.to_string()),
        _ => Error::General(format!("{what}: HTTP {}", status.as_u16())),
    }
}

/// Decode a `format=json` listing
///
/// The body is parsed from bytes as UTF-8 whatever charset the server
/// advertises. An empty body (`204 No Content`) is an empty listing.
pub(crate) async fn decode_listing<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<Vec<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, what));
    }

    let bytes = body_bytes(response).await?;
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&bytes)?)
}
