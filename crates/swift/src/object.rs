//! Object-scoped operations

use reqwest::Method;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, HeaderName, LAST_MODIFIED};
use swc_core::{Error, ObjectMetadata, Result, UploadSource};
use tracing::{debug, instrument};

use crate::container::{ContainerScope, header_str, header_u64, prefixed_headers};
use crate::mimetype;
use crate::session::{body_bytes, send, status_error};

/// Source header of a server-side copy
pub const X_COPY_FROM: HeaderName = HeaderName::from_static("x-copy-from");

const OBJECT_META_PREFIX: &str = "x-object-meta-";

/// A container scope narrowed to one object
///
/// The name is optional only for uploads, where it defaults to the source's
/// file name.
#[derive(Debug, Clone)]
pub struct ObjectScope<'a> {
    container: ContainerScope<'a>,
    name: Option<String>,
}

impl<'a> ObjectScope<'a> {
    pub(crate) fn new(container: ContainerScope<'a>, name: Option<String>) -> Self {
        Self { container, name }
    }

    /// Object name, if one was given
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Container this object lives in
    pub fn container(&self) -> &ContainerScope<'a> {
        &self.container
    }

    fn required_name(&self) -> Result<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Validation("object name is required".into()))
    }

    fn url_for(&self, object: &str) -> String {
        self.container
            .session()
            .url(&[self.container.name(), object])
    }

    /// `<base>/<container>/<object>`
    pub fn url(&self) -> Result<String> {
        Ok(self.url_for(self.required_name()?))
    }

    /// Whether the object exists (`HEAD` answered 2xx)
    #[instrument(skip(self), fields(container = %self.container.name(), object = ?self.name))]
    pub async fn exists(&self) -> Result<bool> {
        let request = self.container.session().request(Method::HEAD, &self.url()?);
        let response = send(request).await?;
        Ok(response.status().is_success())
    }

    /// Upload `source`; returns the raw status (201)
    ///
    /// The whole source is read into memory. `Content-Length` is always sent,
    /// also for empty content, and `Content-Type` is sniffed from the bytes.
    #[instrument(
        skip(self, source),
        fields(container = %self.container.name(), object = ?self.name)
    )]
    pub async fn create(&self, source: UploadSource) -> Result<u16> {
        let name = match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => source.default_object_name().ok_or_else(|| {
                Error::Validation("object name is required for stream uploads".into())
            })?,
        };
        let hint = source.path().map(|p| p.to_path_buf());

        let data = source.into_bytes().await?;
        let content_type = mimetype::detect(&data, hint.as_deref());
        debug!(object = %name, len = data.len(), %content_type, "uploading");

        let request = self
            .container
            .session()
            .request(Method::PUT, &self.url_for(&name))
            .header(CONTENT_LENGTH, data.len())
            .header(CONTENT_TYPE, content_type)
            .body(data);
        let response = send(request).await?;
        Ok(response.status().as_u16())
    }

    /// Download the object as `(ok, body)`
    ///
    /// `ok` is whether the status was 2xx; the body is returned either way.
    #[instrument(skip(self), fields(container = %self.container.name(), object = ?self.name))]
    pub async fn retrieve(&self) -> Result<(bool, Vec<u8>)> {
        let request = self.container.session().request(Method::GET, &self.url()?);
        let response = send(request).await?;
        let ok = response.status().is_success();
        Ok((ok, body_bytes(response).await?))
    }

    /// Server-side copy of this object to `dest` in the same container
    #[instrument(skip(self), fields(container = %self.container.name(), object = ?self.name))]
    pub async fn copy_to(&self, dest: &str) -> Result<u16> {
        let src = self.required_name()?;
        if dest.is_empty() {
            return Err(Error::Validation("destination object name is required".into()));
        }

        let copy_from = format!("/{}/{}", self.container.name(), src);
        let request = self
            .container
            .session()
            .request(Method::PUT, &self.url_for(dest))
            .header(CONTENT_LENGTH, 0)
            .header(X_COPY_FROM, copy_from);
        let response = send(request).await?;
        Ok(response.status().as_u16())
    }

    /// Delete the object; returns the raw status (204)
    #[instrument(skip(self), fields(container = %self.container.name(), object = ?self.name))]
    pub async fn delete(&self) -> Result<u16> {
        let request = self.container.session().request(Method::DELETE, &self.url()?);
        let response = send(request).await?;
        Ok(response.status().as_u16())
    }

    /// Object metadata from `HEAD`
    #[instrument(skip(self), fields(container = %self.container.name(), object = ?self.name))]
    pub async fn metadata(&self) -> Result<ObjectMetadata> {
        let name = self.required_name()?;
        let request = self.container.session().request(Method::HEAD, &self.url_for(name));
        let response = send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(
                status,
                &format!("object '{}/{}'", self.container.name(), name),
            ));
        }

        let headers = response.headers();
        Ok(ObjectMetadata {
            name: name.to_string(),
            content_length: header_u64(headers, CONTENT_LENGTH.as_str()),
            content_type: header_str(headers, CONTENT_TYPE.as_str()),
            etag: header_str(headers, ETAG.as_str()).map(|e| e.trim_matches('"').to_string()),
            last_modified: header_str(headers, LAST_MODIFIED.as_str()),
            metadata: prefixed_headers(headers, OBJECT_META_PREFIX),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{DEFAULT_TIMEOUT, Session};

    fn session() -> Session {
        Session::new("https://example.org/v1/AUTH_x", "tk", true, DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_object_url() {
        let s = session();
        let o = s.container("test").unwrap().object("sample.txt");
        assert_eq!(o.name(), Some("sample.txt"));
        assert_eq!(o.url().unwrap(), "https://example.org/v1/AUTH_x/test/sample.txt");
    }

    #[test]
    fn test_url_requires_name() {
        let s = session();
        let o = s.container("test").unwrap().unnamed_object();
        assert!(matches!(o.url(), Err(Error::Validation(_))));
        let o = s.container("test").unwrap().object("");
        assert!(matches!(o.url(), Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_stream_upload_without_name_is_rejected() {
        let s = session();
        let o = s.container("test").unwrap().unnamed_object();
        let result = o.create(UploadSource::stream(std::io::empty())).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_copy_requires_destination() {
        let s = session();
        let o = s.container("test").unwrap().object("sample.txt");
        assert!(matches!(o.copy_to("").await, Err(Error::Validation(_))));
    }
}
