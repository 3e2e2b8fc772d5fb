//! In-process `ObjectStore` backed by a hash map.
//!
//! Entity tags are assigned the way S3 assigns them to single-part objects
//! (quoted hex MD5), so the controller's skip logic behaves identically.

use crate::config::DEFAULT_CONTENT_TYPE;
use crate::digest::ContentDigest;
use crate::error::{StoreError, StoreResult};
use crate::store::{LookupError, ObjectReader, ObjectStore};
use crate::types::{ObjectAcl, RemoteObjectMetadata};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use tokio::io::AsyncReadExt;

/// An object held by [`MemoryStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub etag: String,
    pub content_type: String,
    pub acl: ObjectAcl,
    pub last_modified: DateTime<Utc>,
}

impl StoredObject {
    fn new(data: Vec<u8>, content_type: &str, acl: ObjectAcl) -> Self {
        let etag = format!("\"{}\"", ContentDigest::of_bytes(&data));
        Self {
            data,
            etag,
            content_type: content_type.to_string(),
            acl,
            last_modified: Utc::now(),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> StoreResult<MutexGuard<'_, HashMap<String, StoredObject>>> {
        self.objects
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Seeds an object directly. Not counted as a write.
    pub fn put(&self, key: &str, data: impl Into<Vec<u8>>) -> StoreResult<()> {
        let object = StoredObject::new(data.into(), DEFAULT_CONTENT_TYPE, ObjectAcl::Private);
        self.objects()?.insert(key.to_string(), object);
        Ok(())
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<StoredObject>> {
        Ok(self.objects()?.get(key).cloned())
    }

    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.objects()?.contains_key(key))
    }

    /// Number of `write_object` calls served.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of `lookup` calls served.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn lookup(&self, key: &str) -> Result<RemoteObjectMetadata, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let objects = self.objects()?;
        let object = objects
            .get(key)
            .ok_or_else(|| LookupError::NotFound(key.to_string()))?;
        Ok(RemoteObjectMetadata {
            etag: Some(object.etag.clone()),
            content_length: Some(object.data.len() as u64),
            last_modified: Some(object.last_modified),
        })
    }

    async fn open_reader(&self, key: &str) -> StoreResult<ObjectReader> {
        let data = self
            .objects()?
            .get(key)
            .map(|o| o.data.clone())
            .ok_or_else(|| StoreError::Backend(format!("no such key: {key}")))?;
        Ok(Box::pin(Cursor::new(data)))
    }

    async fn write_object(
        &self,
        key: &str,
        body: tokio::fs::File,
        length: u64,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut data = Vec::with_capacity(length as usize);
        body.take(length).read_to_end(&mut data).await?;
        if data.len() as u64 != length {
            return Err(StoreError::Backend(format!(
                "short body for {key}: expected {length} bytes, got {}",
                data.len()
            )));
        }
        let object = StoredObject::new(data, content_type, acl);
        self.objects()?.insert(key.to_string(), object);
        Ok(())
    }
}
