//! Shared media storage abstraction for Ripple services
//!
//! Provides a unified "store bytes, return a retrievable URL" contract with
//! an S3-backed implementation for deployments and a local-disk
//! implementation for development.

use async_trait::async_trait;
use thiserror::Error;

pub mod config;
pub mod local;
pub mod s3;

pub use config::MediaStoreConfig;
pub use local::LocalMediaStore;
pub use s3::S3MediaStore;

/// Error raised by media storage operations.
///
/// Every underlying cause (SDK fault, disk fault, bad path) collapses into
/// this single opaque kind; callers decide whether to retry, the transport
/// detail stays here.
#[derive(Debug, Error)]
#[error("media store error: {0}")]
pub struct MediaStoreError(String);

impl MediaStoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Abstraction over persisting raw media bytes.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `bytes` under `file_name` and return the URL the content can be
    /// retrieved from.
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, MediaStoreError>;
}

/// Guess a content type from the file extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub(crate) fn content_type_for(file_name: &str) -> String {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG.to_string(),
        "png" => mime::IMAGE_PNG.to_string(),
        "gif" => mime::IMAGE_GIF.to_string(),
        "mp4" => "video/mp4".to_string(),
        "webm" => "video/webm".to_string(),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}
