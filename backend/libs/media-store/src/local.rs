//! Local-disk media storage for development and single-host deployments
use crate::{MediaStore, MediaStoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Media store that writes files under a root directory and serves them
/// through a site-relative URL prefix.
#[derive(Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, MediaStoreError> {
        // Strip any directory components so a crafted name cannot escape
        // the storage root.
        let name = Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| MediaStoreError::new(format!("invalid file name '{}'", file_name)))?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|err| MediaStoreError::new(err.to_string()))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|err| MediaStoreError::new(err.to_string()))?;

        debug!(path = %path.display(), "media file stored");

        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), name))
    }
}
