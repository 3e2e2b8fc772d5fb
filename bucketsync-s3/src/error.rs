//! S3 backend error types.

use thiserror::Error;

/// Errors raised while turning an `S3Config` into a client.
#[derive(Debug, Error)]
pub enum S3ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
