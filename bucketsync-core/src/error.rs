//! Sync error types.

use crate::types::Operation;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Result type for storage backend calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by an `ObjectStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that abort a download or upload.
///
/// Every variant names the step that failed and wraps the underlying cause.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("digest: reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download: creating destination directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("download: opening {path} for writing: {source}")]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("upload: opening {path}: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op}: looking up key {key}: {source}")]
    RemoteLookup {
        op: Operation,
        key: String,
        #[source]
        source: crate::store::LookupError,
    },

    #[error("download: opening object {key}: {source}")]
    RemoteRead {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("upload: computing digest of {path}: {source}")]
    Digest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("upload: rewinding {path}: {source}")]
    Seek {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("upload: reading file metadata of {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op}: transferring {key}: {source}")]
    Transfer {
        op: Operation,
        key: String,
        #[source]
        source: StoreError,
    },
}

/// Discriminant of a [`SyncError`] for programmatic matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    DirectoryCreation,
    LocalWrite,
    LocalRead,
    RemoteLookup,
    RemoteRead,
    Digest,
    Seek,
    Stat,
    Transfer,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
            Self::LocalWrite { .. } => ErrorKind::LocalWrite,
            Self::LocalRead { .. } => ErrorKind::LocalRead,
            Self::RemoteLookup { .. } => ErrorKind::RemoteLookup,
            Self::RemoteRead { .. } => ErrorKind::RemoteRead,
            Self::Digest { .. } => ErrorKind::Digest,
            Self::Seek { .. } => ErrorKind::Seek,
            Self::Stat { .. } => ErrorKind::Stat,
            Self::Transfer { .. } => ErrorKind::Transfer,
        }
    }
}
