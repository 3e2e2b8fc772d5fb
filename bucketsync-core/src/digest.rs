//! Streaming content digests.
//!
//! The digest is the hex MD5 of the full content, which is also the entity
//! tag S3-compatible stores assign to single-part objects. That makes a local
//! digest directly comparable to a remote tag without downloading anything.

use crate::error::{SyncError, SyncResult};
use md5::{Digest, Md5};
use std::fmt;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Hex-encoded content digest used as an equality oracle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn of_bytes(data: &[u8]) -> Self {
        Self(hex::encode(Md5::digest(data)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against an entity tag as reported by a store.
    ///
    /// Quotes and a weak-validator prefix are ignored; multipart tags
    /// (`<hex>-<parts>`) never match.
    pub fn matches_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        let tag = tag.strip_prefix("W/").unwrap_or(tag);
        let tag = tag.trim_matches('"');
        tag.eq_ignore_ascii_case(&self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digests a reader to EOF without holding the content in memory.
pub async fn digest_reader<R>(reader: &mut R) -> std::io::Result<ContentDigest>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(ContentDigest(hex::encode(hasher.finalize())))
}

/// Digests the file at `path`. The file is opened read-only and closed on return.
pub async fn digest_file(path: impl AsRef<Path>) -> SyncResult<ContentDigest> {
    let path = path.as_ref();
    let io_err = |source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::open(path).await.map_err(io_err)?;
    digest_reader(&mut file).await.map_err(io_err)
}
