//! Helpers composed from [`ObjectStore`] operations
//!
//! These are used by the CLI for `mb -p` and `rb --force`; they only rely on
//! the trait so they can be tested against a mock store.

use crate::error::{Error, Result};
use crate::traits::{ObjectStore, is_success};

/// Outcome of [`empty_container`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Objects deleted
    pub deleted: Vec<String>,
    /// Objects the server refused to delete, with the returned status
    pub failed: Vec<(String, u16)>,
}

impl DeleteSummary {
    /// Whether every object was deleted
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create `container` unless it already exists
///
/// Returns `true` when the container was created by this call.
pub async fn ensure_container(store: &dyn ObjectStore, container: &str) -> Result<bool> {
    if store.container_exists(container).await? {
        tracing::debug!(container, "container already exists");
        return Ok(false);
    }

    let status = store.create_container(container).await?;
    if !is_success(status) {
        return Err(Error::General(format!(
            "Failed to create container '{container}' (HTTP {status})"
        )));
    }
    Ok(true)
}

/// Delete every object in `container`
///
/// A 404 on delete counts as deleted; it was removed concurrently.
pub async fn empty_container(store: &dyn ObjectStore, container: &str) -> Result<DeleteSummary> {
    let mut summary = DeleteSummary::default();

    for object in store.list_objects(container).await? {
        if object.name.is_empty() {
            continue;
        }
        let status = store.delete_object(container, &object.name).await?;
        if is_success(status) || status == 404 {
            summary.deleted.push(object.name);
        } else {
            tracing::warn!(container, object = %object.name, status, "object delete refused");
            summary.failed.push((object.name, status));
        }
    }

    Ok(summary)
}
