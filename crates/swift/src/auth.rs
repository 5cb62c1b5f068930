//! Authentication against tempauth and KeyStone
//!
//! Credentials without a tenant go through Swift's tempauth: a `GET` with
//! `X-Storage-User`/`X-Storage-Pass` whose response headers carry the token
//! and storage URL. With a tenant, a KeyStone v2 or v3 password request is
//! posted and the storage URL is looked up in the returned service catalog.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use swc_core::{Credentials, Error, Result};
use tracing::{debug, instrument, warn};

use crate::session::{DEFAULT_TIMEOUT, Session, body_bytes, http_client, send};

const X_STORAGE_USER: HeaderName = HeaderName::from_static("x-storage-user");
const X_STORAGE_PASS: HeaderName = HeaderName::from_static("x-storage-pass");
const X_AUTH_TOKEN: &str = "x-auth-token";
const X_STORAGE_URL: &str = "x-storage-url";
const X_SUBJECT_TOKEN: &str = "x-subject-token";

/// Catalog entry name holding the storage endpoint in KeyStone v2
pub const V2_SERVICE_NAME: &str = "swift";
/// Catalog entry type holding the storage endpoint in KeyStone v3
pub const V3_SERVICE_TYPE: &str = "object-store";

/// Transport settings for authentication, inherited by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Verify TLS certificates
    pub verify_tls: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
        }
    }
}

/// Authentication protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVersion {
    /// Swift tempauth (no tenant)
    TempAuth,
    /// KeyStone v2.0 (`.../v2.0/tokens`)
    KeystoneV2,
    /// KeyStone v3 (`.../v3/auth/tokens`)
    KeystoneV3,
}

impl AuthVersion {
    /// Choose the protocol from the credentials
    ///
    /// A tenant selects KeyStone; the version comes from the auth URI, and
    /// a URI with neither marker is treated as v2.
    pub fn detect(credentials: &Credentials) -> Self {
        match credentials.tenant_name {
            None => AuthVersion::TempAuth,
            Some(_) if credentials.auth_uri.contains("/v3/auth/tokens") => AuthVersion::KeystoneV3,
            Some(_) => AuthVersion::KeystoneV2,
        }
    }
}

/// Obtain a token and storage URL and build a [`Session`] from them
#[instrument(
    skip(credentials, options),
    fields(auth_uri = %credentials.auth_uri, version = tracing::field::Empty)
)]
pub async fn authenticate(credentials: &Credentials, options: &AuthOptions) -> Result<Session> {
    let version = AuthVersion::detect(credentials);
    tracing::Span::current().record("version", tracing::field::debug(version));

    let (token, base_uri) = match version {
        AuthVersion::TempAuth => tempauth(credentials, options).await?,
        AuthVersion::KeystoneV2 | AuthVersion::KeystoneV3 => {
            keystone(credentials, version, options).await?
        }
    };
    debug!(base_uri = %base_uri, "authenticated");

    Session::new(base_uri, &token, options.verify_tls, options.timeout)
}

/// Tempauth exchange; the status is not inspected and missing headers
/// yield empty strings
async fn tempauth(credentials: &Credentials, options: &AuthOptions) -> Result<(String, String)> {
    let request = http_client(options.verify_tls)?
        .request(Method::GET, &credentials.auth_uri)
        .header(X_STORAGE_USER, &credentials.username)
        .header(X_STORAGE_PASS, &credentials.password)
        .timeout(options.timeout);
    let response = send(request).await?;

    let headers = response.headers();
    Ok((
        header_or_empty(headers, X_AUTH_TOKEN),
        header_or_empty(headers, X_STORAGE_URL),
    ))
}

fn header_or_empty(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn keystone(
    credentials: &Credentials,
    version: AuthVersion,
    options: &AuthOptions,
) -> Result<(String, String)> {
    // tenant is Some for both KeyStone versions
    let tenant = credentials.tenant_name.as_deref().unwrap_or_default();
    let payload = match version {
        AuthVersion::KeystoneV3 => serde_json::to_vec(&V3Request::new(credentials, tenant))?,
        _ => serde_json::to_vec(&V2Request::new(credentials, tenant))?,
    };

    let request = http_client(options.verify_tls)?
        .request(Method::POST, &credentials.auth_uri)
        .header(CONTENT_TYPE, "application/json")
        .body(payload)
        .timeout(options.timeout);
    let response = send(request).await?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = body_bytes(response).await.unwrap_or_default();
        return Err(Error::Auth(format!(
            "HTTP {}: {}",
            status.as_u16(),
            String::from_utf8_lossy(&body)
        )));
    }

    let subject_token = response
        .headers()
        .get(X_SUBJECT_TOKEN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = body_bytes(response).await?;

    match version {
        AuthVersion::KeystoneV3 => {
            let token = subject_token
                .ok_or_else(|| Error::Auth("response carries no X-Subject-Token header".into()))?;
            let response: V3Response = serde_json::from_slice(&body)?;
            Ok((token, v3_endpoint(&response)?))
        }
        _ => {
            let response: V2Response = serde_json::from_slice(&body)?;
            let endpoint = v2_endpoint(&response)?;
            Ok((response.access.token.id, endpoint))
        }
    }
}

fn v2_endpoint(response: &V2Response) -> Result<String> {
    let mut matches = response
        .access
        .service_catalog
        .iter()
        .filter(|entry| entry.name.as_deref() == Some(V2_SERVICE_NAME));
    let entry = first_match(&mut matches, V2_SERVICE_NAME)?;
    entry
        .endpoints
        .first()
        .and_then(|ep| ep.public_url.clone())
        .ok_or_else(|| Error::Auth(format!("catalog entry '{V2_SERVICE_NAME}' has no publicURL")))
}

fn v3_endpoint(response: &V3Response) -> Result<String> {
    let mut matches = response
        .token
        .catalog
        .iter()
        .filter(|entry| entry.kind.as_deref() == Some(V3_SERVICE_TYPE));
    let entry = first_match(&mut matches, V3_SERVICE_TYPE)?;
    entry
        .endpoints
        .first()
        .and_then(|ep| ep.url.clone())
        .ok_or_else(|| Error::Auth(format!("catalog entry '{V3_SERVICE_TYPE}' has no url")))
}

/// First catalog match wins; more than one is logged
fn first_match<'a, T: 'a>(
    matches: &mut impl Iterator<Item = &'a T>,
    service: &str,
) -> Result<&'a T> {
    let first = matches
        .next()
        .ok_or_else(|| Error::Auth(format!("service catalog has no '{service}' entry")))?;
    let extra = matches.count();
    if extra > 0 {
        warn!(service, extra, "several catalog entries match, using the first");
    }
    Ok(first)
}

#[derive(Debug, Serialize)]
struct V2Request<'a> {
    auth: V2Auth<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct V2Auth<'a> {
    password_credentials: V2PasswordCredentials<'a>,
    tenant_name: &'a str,
}

#[derive(Debug, Serialize)]
struct V2PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl<'a> V2Request<'a> {
    fn new(credentials: &'a Credentials, tenant: &'a str) -> Self {
        Self {
            auth: V2Auth {
                password_credentials: V2PasswordCredentials {
                    username: &credentials.username,
                    password: &credentials.password,
                },
                tenant_name: tenant,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct V3Request<'a> {
    auth: V3Auth<'a>,
}

#[derive(Debug, Serialize)]
struct V3Auth<'a> {
    identity: V3Identity<'a>,
    scope: V3Scope<'a>,
}

#[derive(Debug, Serialize)]
struct V3Identity<'a> {
    methods: [&'a str; 1],
    password: V3Password<'a>,
}

#[derive(Debug, Serialize)]
struct V3Password<'a> {
    user: V3User<'a>,
}

#[derive(Debug, Serialize)]
struct V3User<'a> {
    name: &'a str,
    domain: V3Domain<'a>,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct V3Scope<'a> {
    project: V3Project<'a>,
}

#[derive(Debug, Serialize)]
struct V3Project<'a> {
    name: &'a str,
    domain: V3Domain<'a>,
}

#[derive(Debug, Serialize)]
struct V3Domain<'a> {
    id: &'a str,
}

impl<'a> V3Request<'a> {
    fn new(credentials: &'a Credentials, tenant: &'a str) -> Self {
        Self {
            auth: V3Auth {
                identity: V3Identity {
                    methods: ["password"],
                    password: V3Password {
                        user: V3User {
                            name: &credentials.username,
                            domain: V3Domain {
                                id: &credentials.domain,
                            },
                            password: &credentials.password,
                        },
                    },
                },
                scope: V3Scope {
                    project: V3Project {
                        name: tenant,
                        domain: V3Domain {
                            id: &credentials.domain,
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct V2Response {
    access: V2Access,
}

#[derive(Debug, Deserialize)]
struct V2Access {
    token: V2Token,
    #[serde(rename = "serviceCatalog", default)]
    service_catalog: Vec<V2CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct V2Token {
    id: String,
}

#[derive(Debug, Deserialize)]
struct V2CatalogEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    endpoints: Vec<V2Endpoint>,
}

#[derive(Debug, Deserialize)]
struct V2Endpoint {
    #[serde(rename = "publicURL", default)]
    public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct V3Response {
    token: V3Token,
}

#[derive(Debug, Deserialize)]
struct V3Token {
    #[serde(default)]
    catalog: Vec<V3CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct V3CatalogEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    endpoints: Vec<V3Endpoint>,
}

#[derive(Debug, Deserialize)]
struct V3Endpoint {
    #[serde(default)]
    url: Option<String>,
}
