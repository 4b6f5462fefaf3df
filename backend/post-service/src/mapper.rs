//! Pure conversion between transfer records and storage entities
//!
//! The mapper never touches the store and never generates identity or time
//! itself; IDs and timestamps are always passed in by the caller. That keeps
//! every method total and side-effect-free, so mapping a record to an entity
//! and back preserves all mapped fields.
use crate::dto::{CommentRecord, PhotoRecord, PostDraft, PostRecord, UserRecord, VideoRecord};
use crate::models::{Comment, Photo, Post, User, Video};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMapper;

impl EntityMapper {
    pub fn new() -> Self {
        Self
    }

    /// Build a post entity from a creation draft
    pub fn post_from_draft(&self, draft: &PostDraft, id: Uuid, created_on: DateTime<Utc>) -> Post {
        Post {
            id,
            user_id: draft.user_id,
            content: draft.content.clone(),
            visibility: draft.visibility,
            created_on,
            modified_on: None,
            deleted_on: None,
            is_deleted: false,
        }
    }

    /// Flatten a post and its media attachment into a transfer record
    pub fn post_to_record(
        &self,
        post: &Post,
        photo: Option<&Photo>,
        video: Option<&Video>,
    ) -> PostRecord {
        PostRecord {
            id: post.id,
            user_id: post.user_id,
            content: post.content.clone(),
            visibility: post.visibility,
            photo_url: photo.map(|photo| photo.url.clone()),
            video_url: video.map(|video| video.url.clone()),
            created_on: post.created_on,
            modified_on: post.modified_on,
        }
    }

    /// Rebuild a live post entity from a transfer record
    pub fn post_from_record(&self, record: &PostRecord) -> Post {
        Post {
            id: record.id,
            user_id: record.user_id,
            content: record.content.clone(),
            visibility: record.visibility,
            created_on: record.created_on,
            modified_on: record.modified_on,
            deleted_on: None,
            is_deleted: false,
        }
    }

    pub fn photo_from_record(&self, record: &PhotoRecord, id: Uuid, post_id: Uuid) -> Photo {
        Photo {
            id,
            url: record.url.clone(),
            post_id,
        }
    }

    pub fn photo_to_record(&self, photo: &Photo) -> PhotoRecord {
        PhotoRecord {
            url: photo.url.clone(),
        }
    }

    pub fn video_from_record(&self, record: &VideoRecord, id: Uuid, post_id: Uuid) -> Video {
        Video {
            id,
            url: record.url.clone(),
            post_id,
        }
    }

    pub fn video_to_record(&self, video: &Video) -> VideoRecord {
        VideoRecord {
            url: video.url.clone(),
        }
    }

    pub fn user_to_record(&self, user: &User) -> UserRecord {
        UserRecord {
            id: user.id,
            username: user.username.clone(),
            profile_picture_url: user.profile_picture_url.clone(),
            cover_picture_url: user.cover_picture_url.clone(),
        }
    }

    pub fn comment_to_record(&self, comment: &Comment) -> CommentRecord {
        CommentRecord {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content.clone(),
            created_on: comment.created_on,
            modified_on: comment.modified_on,
        }
    }
}
