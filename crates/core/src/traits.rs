//! ObjectStore trait definition
//!
//! This trait defines the interface for Swift container and object operations.
//! It allows the CLI to be decoupled from the HTTP implementation.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether a raw HTTP status code is in the 2xx range
pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// A container record as returned by `GET <account>?format=json`
///
/// Records are passed through: every field is optional on the wire and
/// unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container name
    #[serde(default)]
    pub name: String,

    /// Bytes stored in the container
    #[serde(default)]
    pub bytes: u64,

    /// Number of objects in the container
    #[serde(default)]
    pub count: u64,

    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContainerInfo {
    /// Human-readable size
    pub fn size_human(&self) -> String {
        humansize::format_size(self.bytes, humansize::BINARY)
    }
}

/// An object record as returned by `GET <account>/<container>/?format=json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object name
    #[serde(default)]
    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub bytes: u64,

    /// Content type recorded by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// MD5 of the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Last modification time, e.g. `2013-05-01T08:40:00.459930`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ObjectInfo {
    /// Create a record for an object of the given size
    pub fn new(name: impl Into<String>, bytes: u64) -> Self {
        Self {
            name: name.into(),
            bytes,
            ..Default::default()
        }
    }

    /// Human-readable size
    pub fn size_human(&self) -> String {
        humansize::format_size(self.bytes, humansize::BINARY)
    }

    /// Parsed last-modified timestamp (listings carry no offset; it is UTC)
    pub fn last_modified_at(&self) -> Option<jiff::civil::DateTime> {
        self.last_modified.as_deref()?.parse().ok()
    }
}

/// Container metadata from `HEAD <account>/<container>`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContainerMetadata {
    /// Container name
    pub name: String,

    /// Value of `X-Container-Object-Count`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_count: Option<u64>,

    /// Value of `X-Container-Bytes-Used`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_used: Option<u64>,

    /// `X-Container-Meta-*` headers, keyed by the lowercase suffix
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Object metadata from `HEAD <account>/<container>/<object>`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectMetadata {
    /// Object name
    pub name: String,

    /// Value of `Content-Length`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,

    /// Value of `Content-Type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Value of `ETag`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Value of `Last-Modified` (HTTP date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    /// `X-Object-Meta-*` headers, keyed by the lowercase suffix
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Content to upload as an object
pub enum UploadSource {
    /// A file on the local filesystem
    LocalFile(PathBuf),
    /// An already-open reader such as stdin; it has no name of its own
    Stream(Box<dyn Read + Send>),
}

impl UploadSource {
    /// Wrap a reader
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        UploadSource::Stream(Box::new(reader))
    }

    /// Object name implied by the source: the file's base name
    pub fn default_object_name(&self) -> Option<String> {
        match self {
            UploadSource::LocalFile(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            UploadSource::Stream(_) => None,
        }
    }

    /// Local path, if any, for content-type hints
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            UploadSource::LocalFile(path) => Some(path),
            UploadSource::Stream(_) => None,
        }
    }

    /// Read the whole source into memory
    pub async fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            UploadSource::LocalFile(path) => Ok(tokio::fs::read(&path).await?),
            UploadSource::Stream(mut reader) => {
                let read = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
                    let mut buffer = Vec::new();
                    reader.read_to_end(&mut buffer)?;
                    Ok(buffer)
                });
                read.await
                    .map_err(|e| Error::General(format!("Failed to read upload stream: {e}")))?
            }
        }
    }
}

impl std::fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSource::LocalFile(path) => f.debug_tuple("LocalFile").field(path).finish(),
            UploadSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Trait for Swift container and object operations
///
/// Mutating operations return the raw HTTP status so callers can tell
/// `201 Created` from `202 Accepted`; existence checks return booleans.
/// This trait is implemented by the Swift adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List containers of the account
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>>;

    /// Check if a container exists
    async fn container_exists(&self, container: &str) -> Result<bool>;

    /// Get container metadata
    async fn container_metadata(&self, container: &str) -> Result<ContainerMetadata>;

    /// Create a container
    async fn create_container(&self, container: &str) -> Result<u16>;

    /// Delete a container
    async fn delete_container(&self, container: &str) -> Result<u16>;

    /// List objects in a container
    async fn list_objects(&self, container: &str) -> Result<Vec<ObjectInfo>>;

    /// Check if an object exists
    async fn object_exists(&self, container: &str, object: &str) -> Result<bool>;

    /// Get object metadata
    async fn object_metadata(&self, container: &str, object: &str) -> Result<ObjectMetadata>;

    /// Upload an object; `object` defaults to the source's file name
    async fn create_object(
        &self,
        container: &str,
        source: UploadSource,
        object: Option<String>,
    ) -> Result<u16>;

    /// Download an object as `(ok, body)`
    async fn retrieve_object(&self, container: &str, object: &str) -> Result<(bool, Vec<u8>)>;

    /// Server-side copy of `src` to `dest` within one container
    async fn copy_object(&self, container: &str, src: &str, dest: &str) -> Result<u16>;

    /// Delete an object
    async fn delete_object(&self, container: &str, object: &str) -> Result<u16>;
}
