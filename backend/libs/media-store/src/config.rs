//! Media store configuration shared across services
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaStoreConfig {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain)
    pub base_url: String,
}

impl MediaStoreConfig {
    /// Load media store configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("MEDIA_S3_BUCKET")
                .unwrap_or_else(|_| "ripple-media".to_string()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("MEDIA_BASE_URL")
                .unwrap_or_else(|_| "https://cdn.ripple.dev".to_string()),
        }
    }

    /// Public URL for a stored object
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}
