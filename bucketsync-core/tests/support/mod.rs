//! Shared test helpers: scratch directories and a fault-injecting store.

#![allow(dead_code)]

use async_trait::async_trait;
use bucketsync_core::{
    LookupError, MemoryStore, ObjectAcl, ObjectReader, ObjectStore, RemoteObjectMetadata,
    StoreError, StoreResult,
};
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// Writes `contents` to `dir/name`, returning the full path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Which store call should fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub lookup_transport: bool,
    pub open_reader: bool,
    /// Reader yields this many bytes, then errors.
    pub reader_breaks_after: Option<usize>,
    pub write: bool,
}

/// `MemoryStore` wrapper that injects failures.
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub faults: Faults,
}

impl FaultyStore {
    pub fn new(faults: Faults) -> Self {
        Self {
            inner: MemoryStore::new(),
            faults,
        }
    }
}

#[async_trait]
impl ObjectStore for FaultyStore {
    async fn lookup(&self, key: &str) -> Result<RemoteObjectMetadata, LookupError> {
        if self.faults.lookup_transport {
            return Err(StoreError::Backend("connection reset".into()).into());
        }
        self.inner.lookup(key).await
    }

    async fn open_reader(&self, key: &str) -> StoreResult<ObjectReader> {
        if self.faults.open_reader {
            return Err(StoreError::Backend("access denied".into()));
        }
        let reader = self.inner.open_reader(key).await?;
        match self.faults.reader_breaks_after {
            Some(limit) => Ok(Box::pin(BreakingReader {
                inner: reader,
                remaining: limit,
            })),
            None => Ok(reader),
        }
    }

    async fn write_object(
        &self,
        key: &str,
        body: tokio::fs::File,
        length: u64,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StoreResult<()> {
        if self.faults.write {
            return Err(StoreError::Backend("slow down".into()));
        }
        self.inner
            .write_object(key, body, length, content_type, acl)
            .await
    }
}

/// Passes through `remaining` bytes, then fails every read.
struct BreakingReader {
    inner: ObjectReader,
    remaining: usize,
}

impl AsyncRead for BreakingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.remaining == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "stream interrupted",
            )));
        }
        let limit = self.remaining.min(buf.remaining());
        let mut limited = ReadBuf::new(&mut buf.initialize_unfilled()[..limit]);
        match self.inner.as_mut().poll_read(cx, &mut limited) {
            Poll::Ready(Ok(())) => {
                let n = limited.filled().len();
                buf.advance(n);
                self.remaining -= n;
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}
