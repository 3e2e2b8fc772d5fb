//! `ObjectStore` over S3 head/get/put operations.
//!
//! Objects are streamed in both directions: downloads hand back the response
//! body as an async reader and uploads stream the source file.

use crate::config::S3Config;
use crate::error::S3ConfigError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::{RequestChecksumCalculation, ResponseChecksumValidation};
use aws_sdk_s3::primitives::{ByteStream, DateTime as AwsDateTime, Length};
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_types::region::Region;
use bucketsync_core::{
    LookupError, ObjectAcl, ObjectReader, ObjectStore, RemoteObjectMetadata, StoreError,
    StoreResult,
};
use chrono::{DateTime, Utc};
use tracing::debug;

/// S3 bucket as an object store.
pub struct S3Store {
    client: S3Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client from `config` and binds it to the configured bucket.
    pub async fn connect(config: &S3Config) -> Result<Self, S3ConfigError> {
        config.validate()?;
        let client = build_client(config).await;
        Ok(Self::new(client, config.bucket.clone()))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

async fn build_client(config: &S3Config) -> S3Client {
    let region = Region::new(config.region.clone());

    let mut builder = match config.static_credentials() {
        Some(credentials) => aws_sdk_s3::Config::builder()
            .region(region)
            .credentials_provider(credentials)
            .behavior_version_latest(),
        None => {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        }
    };

    // S3-compatible services reject aws-chunked bodies with trailing checksums.
    builder = builder
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
        .response_checksum_validation(ResponseChecksumValidation::WhenRequired);

    if let Some(ref endpoint) = config.endpoint_override {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    S3Client::from_conf(builder.build())
}

/// Maps a canned access level onto the SDK enum.
pub fn canned_acl(acl: ObjectAcl) -> ObjectCannedAcl {
    match acl {
        ObjectAcl::Private => ObjectCannedAcl::Private,
        ObjectAcl::PublicRead => ObjectCannedAcl::PublicRead,
        ObjectAcl::PublicReadWrite => ObjectCannedAcl::PublicReadWrite,
        ObjectAcl::AuthenticatedRead => ObjectCannedAcl::AuthenticatedRead,
        ObjectAcl::BucketOwnerRead => ObjectCannedAcl::BucketOwnerRead,
        ObjectAcl::BucketOwnerFullControl => ObjectCannedAcl::BucketOwnerFullControl,
    }
}

fn to_chrono(dt: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn lookup(&self, key: &str) -> Result<RemoteObjectMetadata, LookupError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => Ok(RemoteObjectMetadata {
                etag: resp.e_tag().map(String::from),
                content_length: resp.content_length().and_then(|n| u64::try_from(n).ok()),
                last_modified: resp.last_modified().and_then(to_chrono),
            }),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    Err(LookupError::NotFound(key.to_string()))
                } else {
                    Err(StoreError::Backend(format!(
                        "head object failed for {key}: {service_err}"
                    ))
                    .into())
                }
            }
        }
    }

    async fn open_reader(&self, key: &str) -> StoreResult<ObjectReader> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("download failed for {key}: {e}")))?;

        debug!(
            "streaming {:?} bytes from s3://{}/{key}",
            resp.content_length(),
            self.bucket
        );
        Ok(Box::pin(resp.body.into_async_read()))
    }

    async fn write_object(
        &self,
        key: &str,
        body: tokio::fs::File,
        length: u64,
        content_type: &str,
        acl: ObjectAcl,
    ) -> StoreResult<()> {
        let content_length = i64::try_from(length)
            .map_err(|_| StoreError::Backend(format!("object too large for {key}: {length}")))?;

        let stream = ByteStream::read_from()
            .file(body)
            .length(Length::Exact(length))
            .build()
            .await
            .map_err(|e| StoreError::Backend(format!("failed to stream body for {key}: {e}")))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(stream)
            .content_length(content_length)
            .content_type(content_type)
            .acl(canned_acl(acl))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("upload failed for {key}: {e}")))?;

        debug!("uploaded {length} bytes to s3://{}/{key}", self.bucket);
        Ok(())
    }
}
