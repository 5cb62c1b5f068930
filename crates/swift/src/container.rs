//! Container-scoped operations

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::Method;
use swc_core::{ContainerMetadata, Error, ObjectInfo, Result};
use tracing::instrument;

use crate::object::ObjectScope;
use crate::session::{Session, decode_listing, send, status_error};

const CONTAINER_META_PREFIX: &str = "x-container-meta-";

/// A session narrowed to one container
#[derive(Debug, Clone)]
pub struct ContainerScope<'a> {
    session: &'a Session,
    name: String,
}

impl<'a> ContainerScope<'a> {
    pub(crate) fn new(session: &'a Session, name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::Validation("container name is required".into()));
        }
        // A slash would make the URL address an object inside another container
        if name.contains('/') {
            return Err(Error::Validation(format!(
                "container name '{name}' must not contain '/'"
            )));
        }
        Ok(Self { session, name })
    }

    /// Container name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Session this scope issues requests with
    pub fn session(&self) -> &'a Session {
        self.session
    }

    /// `<base>/<container>`
    pub fn url(&self) -> String {
        self.session.url(&[&self.name])
    }

    fn describe(&self) -> String {
        format!("container '{}'", self.name)
    }

    /// Scope to an object of this container
    pub fn object(&self, name: impl Into<String>) -> ObjectScope<'a> {
        ObjectScope::new(self.clone(), Some(name.into()))
    }

    /// Scope for an upload whose name comes from its source
    pub fn unnamed_object(&self) -> ObjectScope<'a> {
        ObjectScope::new(self.clone(), None)
    }

    /// Whether the container exists (`HEAD` answered 2xx)
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn exists(&self) -> Result<bool> {
        let response = send(self.session.request(Method::HEAD, &self.url())).await?;
        Ok(response.status().is_success())
    }

    /// Create the container; returns the raw status (201 or 202)
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn create(&self) -> Result<u16> {
        let response = send(self.session.request(Method::PUT, &self.url())).await?;
        Ok(response.status().as_u16())
    }

    /// Delete the container; returns the raw status (204 when empty)
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn delete(&self) -> Result<u16> {
        let response = send(self.session.request(Method::DELETE, &self.url())).await?;
        Ok(response.status().as_u16())
    }

    /// List the objects of the container
    ///
    /// The listing URL keeps a trailing slash: `<base>/<container>/?format=json`.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn list_objects(&self) -> Result<Vec<ObjectInfo>> {
        let url = format!("{}/", self.url());
        let request = self
            .session
            .request(Method::GET, &url)
            .query(&[("format", "json")]);
        let response = send(request).await?;
        decode_listing(response, &self.describe()).await
    }

    /// Container metadata from `HEAD`
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn metadata(&self) -> Result<ContainerMetadata> {
        let response = send(self.session.request(Method::HEAD, &self.url())).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &self.describe()));
        }

        let headers = response.headers();
        Ok(ContainerMetadata {
            name: self.name.clone(),
            object_count: header_u64(headers, "x-container-object-count"),
            bytes_used: header_u64(headers, "x-container-bytes-used"),
            metadata: prefixed_headers(headers, CONTAINER_META_PREFIX),
        })
    }
}

pub(crate) fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    header_str(headers, name)?.trim().parse().ok()
}

/// Headers starting with `prefix`, keyed by the remainder
pub(crate) fn prefixed_headers(headers: &HeaderMap, prefix: &str) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let key = name.as_str().strip_prefix(prefix)?;
            let value = value.to_str().ok()?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}
