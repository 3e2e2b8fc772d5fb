//! S3 connection configuration.

use crate::error::S3ConfigError;
use aws_credential_types::Credentials;
use serde::{Deserialize, Serialize};

/// Where and as whom to reach the bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct S3Config {
    /// Bucket holding the synced objects.
    pub bucket: String,

    /// AWS region for S3.
    pub region: String,

    /// Optional S3 endpoint override (MinIO, R2). Forces path-style addressing.
    pub endpoint_override: Option<String>,

    /// Static access key. When unset, the default provider chain is used.
    pub access_key_id: Option<String>,

    pub secret_access_key: Option<String>,

    pub session_token: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint_override: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), S3ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(S3ConfigError::Invalid("bucket must not be empty".into()));
        }
        if self.region.trim().is_empty() {
            return Err(S3ConfigError::Invalid("region must not be empty".into()));
        }
        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(S3ConfigError::Invalid(
                "access_key_id and secret_access_key must be set together".into(),
            ));
        }
        Ok(())
    }

    /// Static credentials, if a full key pair is configured.
    pub fn static_credentials(&self) -> Option<Credentials> {
        let access_key_id = self.access_key_id.as_ref()?;
        let secret_access_key = self.secret_access_key.as_ref()?;
        Some(Credentials::new(
            access_key_id,
            secret_access_key,
            self.session_token.clone(),
            None,
            "bucketsync-static",
        ))
    }
}
