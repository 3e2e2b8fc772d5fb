//! Content-addressed file synchronization against object storage.
//!
//! Decides, per file/key pair, whether a transfer is needed by comparing a
//! locally computed content digest against the remote object's entity tag:
//! - Digest engine: streaming MD5 over files and readers
//! - Sync controller: one-shot `download` / `upload` with skip detection
//! - Storage capability: the narrow `ObjectStore` trait backends implement
//! - In-memory store for tests and embedding

pub mod config;
pub mod digest;
pub mod error;
pub mod memory;
pub mod store;
pub mod syncer;
pub mod types;

pub use config::SyncConfig;
pub use digest::{ContentDigest, digest_file, digest_reader};
pub use error::{ErrorKind, StoreError, StoreResult, SyncError, SyncResult};
pub use memory::MemoryStore;
pub use store::{LookupError, ObjectReader, ObjectStore};
pub use syncer::Syncer;
pub use types::*;
