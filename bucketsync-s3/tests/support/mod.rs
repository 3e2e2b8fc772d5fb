//! Shared test helpers for S3 store tests.

#![allow(dead_code)]

use bucketsync_s3::{S3Config, S3Store};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const TEST_BUCKET: &str = "bucketsync-test";

/// Config with static credentials pointing at `endpoint`.
pub fn config_for(endpoint: &str) -> S3Config {
    S3Config {
        bucket: TEST_BUCKET.into(),
        region: "us-east-1".into(),
        endpoint_override: Some(endpoint.into()),
        access_key_id: Some("bucketsync-test".into()),
        secret_access_key: Some("bucketsync-test-secret".into()),
        session_token: None,
    }
}

pub async fn store_for(endpoint: &str) -> S3Store {
    S3Store::connect(&config_for(endpoint))
        .await
        .expect("test config must be valid")
}

/// S3Store pointing at local MinIO (docker-compose.test.yml).
pub async fn minio_store() -> S3Store {
    store_for("http://localhost:9000").await
}

/// Per-test unique S3 prefix to prevent collisions.
pub fn unique_prefix() -> String {
    format!("test-runs/{}", Uuid::new_v4())
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
