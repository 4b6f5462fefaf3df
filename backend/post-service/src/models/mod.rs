//! Storage entities for the post service
//!
//! Every read query in the repository filters on the soft-delete columns;
//! deleted rows stay in place and never surface through the services.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who can see a post. Stored, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "visibility", rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Friends,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// Post entity. Owns at most one of {Photo, Video}; the repository keeps the
/// two mutually exclusive on every attach.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub visibility: Visibility,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
    pub deleted_on: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Photo attachment, one-to-one with its owning post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
    pub post_id: Uuid,
}

/// Video attachment, one-to-one with its owning post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub url: String,
    pub post_id: Uuid,
}

/// User entity. Picture URLs change only through the display-picture
/// workflow.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub profile_picture_url: Option<String>,
    pub cover_picture_url: Option<String>,
    pub created_on: DateTime<Utc>,
}

/// Directed friendship edge with soft delete
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub user_id: Uuid,
    pub friend_user_id: Uuid,
    pub created_on: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Comment entity - a user's comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: Option<DateTime<Utc>>,
    pub deleted_on: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Like entity - unique per (post, user), removed outright on unlike
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_on: DateTime<Utc>,
}
