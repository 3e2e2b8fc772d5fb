//! Storage capability consumed by the sync controller.

use crate::error::{StoreError, StoreResult};
use crate::types::{ObjectAcl, RemoteObjectMetadata};
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Sequential byte source for an object's content.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Why a metadata lookup produced no metadata.
///
/// `NotFound` is an expected answer; `Store` means the store could not be
/// asked (transport failure, auth, throttling).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Object storage operations the controller needs. Implementations own
/// bucket identity and credentials.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches metadata for `key` without reading its content.
    async fn lookup(&self, key: &str) -> Result<RemoteObjectMetadata, LookupError>;

    /// Opens a streaming reader over the content of `key`.
    async fn open_reader(&self, key: &str) -> StoreResult<ObjectReader>;

    /// Writes `length` bytes from `body` (positioned at the start of the
    /// content) as the object `key`, replacing any existing object.
    async fn write_object(
        &self,
        key: &str,
        body: tokio::fs::File,
        length: u64,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StoreResult<()>;
}
