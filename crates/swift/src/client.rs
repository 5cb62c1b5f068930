//! Swift client implementation
//!
//! Wraps an authenticated [`Session`] and implements the ObjectStore trait
//! from swc-core.

use std::time::Duration;

use async_trait::async_trait;
use swc_core::{
    Alias, ContainerInfo, ContainerMetadata, DEFAULT_TIMEOUT_SECS, ObjectInfo, ObjectMetadata,
    ObjectStore, Result, UploadSource,
};

use crate::auth::{AuthOptions, authenticate};
use crate::session::Session;

/// Swift client
#[derive(Debug, Clone)]
pub struct SwiftClient {
    session: Session,
}

impl SwiftClient {
    /// Wrap an existing session
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Authenticate with an alias's credentials
    pub async fn connect(alias: &Alias) -> Result<Self> {
        Self::connect_with_timeout(alias, alias.timeout_or(DEFAULT_TIMEOUT_SECS)).await
    }

    /// Authenticate, using `timeout` for every request
    pub async fn connect_with_timeout(alias: &Alias, timeout: Duration) -> Result<Self> {
        let options = AuthOptions {
            timeout,
            verify_tls: !alias.insecure,
        };
        let session = authenticate(&alias.credentials(), &options).await?;
        Ok(Self { session })
    }

    /// Get the underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[async_trait]
impl ObjectStore for SwiftClient {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        self.session.list_containers().await
    }

    async fn container_exists(&self, container: &str) -> Result<bool> {
        self.session.container(container)?.exists().await
    }

    async fn container_metadata(&self, container: &str) -> Result<ContainerMetadata> {
        self.session.container(container)?.metadata().await
    }

    async fn create_container(&self, container: &str) -> Result<u16> {
        self.session.container(container)?.create().await
    }

    async fn delete_container(&self, container: &str) -> Result<u16> {
        self.session.container(container)?.delete().await
    }

    async fn list_objects(&self, container: &str) -> Result<Vec<ObjectInfo>> {
        self.session.container(container)?.list_objects().await
    }

    async fn object_exists(&self, container: &str, object: &str) -> Result<bool> {
        self.session.container(container)?.object(object).exists().await
    }

    async fn object_metadata(&self, container: &str, object: &str) -> Result<ObjectMetadata> {
        self.session
            .container(container)?
            .object(object)
            .metadata()
            .await
    }

    async fn create_object(
        &self,
        container: &str,
        source: UploadSource,
        object: Option<String>,
    ) -> Result<u16> {
        let scope = self.session.container(container)?;
        let target = match object {
            Some(name) => scope.object(name),
            None => scope.unnamed_object(),
        };
        target.create(source).await
    }

    async fn retrieve_object(&self, container: &str, object: &str) -> Result<(bool, Vec<u8>)> {
        self.session
            .container(container)?
            .object(object)
            .retrieve()
            .await
    }

    async fn copy_object(&self, container: &str, src: &str, dest: &str) -> Result<u16> {
        self.session
            .container(container)?
            .object(src)
            .copy_to(dest)
            .await
    }

    async fn delete_object(&self, container: &str, object: &str) -> Result<u16> {
        self.session
            .container(container)?
            .object(object)
            .delete()
            .await
    }
}
