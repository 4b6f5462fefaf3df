//! Transfer records exposed to callers
//!
//! These are the externally-facing representations, decoupled from the
//! storage rows in [`crate::models`]. The HTTP layer (out of tree) works
//! exclusively in terms of these types.
use crate::models::Visibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as callers see it: media is flattened to at most one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub visibility: Visibility,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
}

/// Input for creating a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub user_id: Uuid,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Reference to an already-stored photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub url: String,
}

/// Reference to an already-stored video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub url: String,
}

/// Raw file handed over by the upload endpoint
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A user as callers see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub cover_picture_url: Option<String>,
}

/// A comment as callers see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
}
