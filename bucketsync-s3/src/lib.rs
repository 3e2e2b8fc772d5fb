//! S3-compatible `ObjectStore` backend for bucketsync.
//!
//! Works against Amazon S3 and S3-compatible services (MinIO, R2) via an
//! endpoint override with path-style addressing.

pub mod config;
pub mod error;
pub mod store;

pub use config::S3Config;
pub use error::S3ConfigError;
pub use store::S3Store;
