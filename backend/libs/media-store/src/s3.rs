//! S3-backed media storage
use crate::config::MediaStoreConfig;
use crate::{content_type_for, MediaStore, MediaStoreError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Media store backed by an S3 bucket fronted by a CDN.
#[derive(Clone)]
pub struct S3MediaStore {
    client: Arc<Client>,
    config: MediaStoreConfig,
}

impl S3MediaStore {
    pub fn new(client: Arc<Client>, config: MediaStoreConfig) -> Self {
        Self { client, config }
    }

    /// Create a store with AWS credentials and configuration from the environment
    pub async fn from_env() -> Result<Self, MediaStoreError> {
        let config = MediaStoreConfig::from_env();
        let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let client = Client::new(&aws_config);

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Health check for bucket connectivity
    pub async fn health_check(&self) -> Result<(), MediaStoreError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|err| MediaStoreError::new(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, MediaStoreError> {
        // Prefix with a fresh UUID so distinct uploads of the same file name
        // never overwrite each other.
        let key = format!("{}/{}", Uuid::new_v4(), file_name);

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .content_type(content_type_for(file_name))
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|err| MediaStoreError::new(err.to_string()))?;

        debug!(%key, bucket = %self.config.bucket, "media object stored");

        Ok(self.config.public_url(&key))
    }
}
