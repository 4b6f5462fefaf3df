//! Persistent repository seam
//!
//! One trait covers the durable storage of users, posts, media rows,
//! friendships, comments, and likes so the services can be driven against
//! Postgres in deployments and against in-memory doubles in tests.
mod postgres_repository;

pub use postgres_repository::PostgresRepository;

use crate::error::Result;
use crate::models::{Comment, Friendship, Like, Photo, Post, User, Video};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sort applied to a content search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrdering {
    /// Ascending by post content
    ContentAsc,
    /// Descending by post content
    ContentDesc,
    /// Descending by creation time
    MostRecent,
}

impl PostOrdering {
    /// Map a caller-supplied sort key onto an ordering. Anything other than
    /// the two recognized keys, including the empty default, sorts by
    /// creation time.
    pub fn from_sort_order(sort_order: &str) -> Self {
        match sort_order {
            "nameAsc" => PostOrdering::ContentAsc,
            "nameDesc" => PostOrdering::ContentDesc,
            _ => PostOrdering::MostRecent,
        }
    }
}

/// Repository trait for the durable store behind the post service.
///
/// Every read is soft-delete-aware: rows with `is_deleted = true` never
/// surface. Implementations must keep the photo/video attachment of a post
/// mutually exclusive; `replace_photo` and `replace_video` each clear the
/// opposite slot in the same write.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Persist the mutable profile fields (picture URLs) of an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    async fn insert_post(&self, post: &Post) -> Result<()>;

    /// Find a non-deleted post by id.
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// All non-deleted posts by a user, newest first.
    async fn find_posts_by_user(&self, user_id: Uuid) -> Result<Vec<Post>>;

    /// All non-deleted posts, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Persist content, visibility, and modification time of a non-deleted
    /// post. Returns false when no such post exists.
    async fn update_post(&self, post: &Post) -> Result<bool>;

    /// Soft-delete a post. Returns false when no non-deleted post matched.
    async fn soft_delete_post(&self, post_id: Uuid, deleted_on: DateTime<Utc>) -> Result<bool>;

    /// Case-insensitive substring search over non-deleted post content.
    async fn search_posts(&self, term: &str, order: PostOrdering) -> Result<Vec<Post>>;

    // ------------------------------------------------------------------
    // Media attachments
    // ------------------------------------------------------------------

    /// Attach a photo to its post, clearing any existing photo or video.
    async fn replace_photo(&self, photo: &Photo) -> Result<()>;

    /// Attach a video to its post, clearing any existing photo or video.
    async fn replace_video(&self, video: &Video) -> Result<()>;

    /// Remove both media slots of a post.
    async fn clear_media(&self, post_id: Uuid) -> Result<()>;

    async fn find_photo_by_post(&self, post_id: Uuid) -> Result<Option<Photo>>;

    async fn find_video_by_post(&self, post_id: Uuid) -> Result<Option<Video>>;

    // ------------------------------------------------------------------
    // Friendships
    // ------------------------------------------------------------------

    /// Non-deleted outgoing edges of a user, oldest first.
    async fn find_friendships(&self, user_id: Uuid) -> Result<Vec<Friendship>>;

    /// Find a directed edge regardless of its soft-delete state.
    async fn find_friendship(
        &self,
        user_id: Uuid,
        friend_user_id: Uuid,
    ) -> Result<Option<Friendship>>;

    async fn insert_friendship(&self, friendship: &Friendship) -> Result<()>;

    async fn update_friendship(&self, friendship: &Friendship) -> Result<()>;

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Find a non-deleted comment by id.
    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;

    /// Non-deleted comments on a post, oldest first.
    async fn find_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    /// Persist content and modification time of a non-deleted comment.
    async fn update_comment(&self, comment: &Comment) -> Result<bool>;

    /// Soft-delete a comment. Returns false when no non-deleted comment
    /// matched.
    async fn soft_delete_comment(
        &self,
        comment_id: Uuid,
        deleted_on: DateTime<Utc>,
    ) -> Result<bool>;

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Insert a like. Returns false when the (post, user) pair already has
    /// one.
    async fn insert_like(&self, like: &Like) -> Result<bool>;

    /// Remove a like. Returns false when none existed.
    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn count_likes(&self, post_id: Uuid) -> Result<i64>;
}
