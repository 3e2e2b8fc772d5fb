//! Sync controller: one self-contained decision + transfer per call.
//!
//! A transfer happens only when `force` is set or no digest match between
//! the local file and the remote entity tag could be established. No call
//! retries, and local file handles are dropped on every exit path.

use crate::config::SyncConfig;
use crate::digest::{digest_file, digest_reader};
use crate::error::{SyncError, SyncResult};
use crate::store::{LookupError, ObjectStore};
use crate::types::{Operation, TransferOutcome};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::{DirBuilder, File, OpenOptions};
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info};

/// Downloads and uploads single files against one object store.
pub struct Syncer<S: ObjectStore + ?Sized> {
    store: Arc<S>,
    config: SyncConfig,
}

impl<S: ObjectStore + ?Sized> Syncer<S> {
    pub fn new(store: Arc<S>, config: SyncConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Ensures `destination` holds the content stored under `key`.
    ///
    /// If the copy fails midway the destination may be left truncated; the
    /// error is still reported and cleanup is up to the caller.
    pub async fn download(
        &self,
        key: &str,
        destination: impl AsRef<Path>,
    ) -> SyncResult<TransferOutcome> {
        let destination = destination.as_ref();

        if !self.config.force {
            match digest_file(destination).await {
                Ok(local) => {
                    let remote = self.store.lookup(key).await.map_err(|source| {
                        SyncError::RemoteLookup {
                            op: Operation::Download,
                            key: key.to_string(),
                            source,
                        }
                    })?;
                    if remote.etag.as_deref().is_some_and(|tag| local.matches_tag(tag)) {
                        info!(
                            "download skipped, {} already matches {key}",
                            destination.display()
                        );
                        return Ok(TransferOutcome::Skipped);
                    }
                    debug!(
                        "digest mismatch for {key}: local {local}, remote {:?}",
                        remote.etag
                    );
                }
                Err(e) => debug!("no local copy to compare for {key}: {e}"),
            }
        }

        if let Some(dir) = destination.parent().filter(|p| !p.as_os_str().is_empty())
            && tokio::fs::metadata(dir).await.is_err()
        {
            create_dir_all(dir)
                .await
                .map_err(|source| SyncError::DirectoryCreation {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let mut file = open_for_write(destination)
            .await
            .map_err(|source| SyncError::LocalWrite {
                path: destination.to_path_buf(),
                source,
            })?;

        let mut reader = self
            .store
            .open_reader(key)
            .await
            .map_err(|source| SyncError::RemoteRead {
                key: key.to_string(),
                source,
            })?;

        let transfer_err = |source: std::io::Error| SyncError::Transfer {
            op: Operation::Download,
            key: key.to_string(),
            source: source.into(),
        };
        let bytes = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(transfer_err)?;
        file.flush().await.map_err(transfer_err)?;

        info!("downloaded {bytes} bytes from {key} to {}", destination.display());
        Ok(TransferOutcome::Transferred { bytes })
    }

    /// Ensures object `key` holds the content of `source`.
    pub async fn upload(
        &self,
        source: impl AsRef<Path>,
        key: &str,
    ) -> SyncResult<TransferOutcome> {
        let path = source.as_ref();

        let mut file = File::open(path)
            .await
            .map_err(|source| SyncError::LocalRead {
                path: path.to_path_buf(),
                source,
            })?;

        if !self.config.force {
            match self.store.lookup(key).await {
                Ok(remote) => {
                    let local = digest_reader(&mut file)
                        .await
                        .map_err(|source| SyncError::Digest {
                            path: path.to_path_buf(),
                            source,
                        })?;
                    if remote.etag.as_deref().is_some_and(|tag| local.matches_tag(tag)) {
                        info!("upload skipped, {key} already matches {}", path.display());
                        return Ok(TransferOutcome::Skipped);
                    }
                    debug!(
                        "digest mismatch for {key}: local {local}, remote {:?}",
                        remote.etag
                    );
                    file.rewind().await.map_err(|source| SyncError::Seek {
                        path: path.to_path_buf(),
                        source,
                    })?;
                }
                Err(LookupError::NotFound(_)) => debug!("{key} not present remotely"),
                Err(source) => {
                    return Err(SyncError::RemoteLookup {
                        op: Operation::Upload,
                        key: key.to_string(),
                        source,
                    });
                }
            }
        }

        let length = file
            .metadata()
            .await
            .map_err(|source| SyncError::Stat {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        self.store
            .write_object(key, file, length, &self.config.content_type, self.config.acl)
            .await
            .map_err(|source| SyncError::Transfer {
                op: Operation::Upload,
                key: key.to_string(),
                source,
            })?;

        info!("uploaded {length} bytes from {} to {key}", path.display());
        Ok(TransferOutcome::Transferred { bytes: length })
    }
}

async fn create_dir_all(dir: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(dir).await
}

async fn open_for_write(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o644);
    options.open(path).await
}
