//! In-memory doubles for driving the services without Postgres or S3.
//!
//! The repository double mirrors the Postgres implementation's contracts:
//! soft-delete-aware reads, mutually exclusive media slots, idempotent like
//! inserts. Both doubles support failure injection for the lenient-delete
//! and upload-failure paths.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use media_store::{MediaStore, MediaStoreError};
use post_service::dto::PostRecord;
use post_service::error::{AppError, Result};
use post_service::mapper::EntityMapper;
use post_service::models::{Comment, Friendship, Like, Photo, Post, User, Video, Visibility};
use post_service::repository::{ContentRepository, PostOrdering};
use post_service::services::PostService;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("post_service=debug")
        .try_init();
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
    photos: Vec<Photo>,
    videos: Vec<Video>,
    friendships: Vec<Friendship>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
}

/// In-memory stand-in for `PostgresRepository`
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent write fail with a database error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn guard_writes(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::Database("injected store failure".to_string()))
        } else {
            Ok(())
        }
    }

    pub fn add_user(&self, username: &str) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            profile_picture_url: None,
            cover_picture_url: None,
            created_on: Utc::now(),
        };
        let id = user.id;
        self.state.lock().unwrap().users.push(user);
        id
    }

    pub fn add_post_at(&self, user_id: Uuid, content: &str, created_on: DateTime<Utc>) -> Uuid {
        let post = Post {
            id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            visibility: Visibility::Public,
            created_on,
            modified_on: None,
            deleted_on: None,
            is_deleted: false,
        };
        let id = post.id;
        self.state.lock().unwrap().posts.push(post);
        id
    }

    pub fn add_friendship_at(
        &self,
        user_id: Uuid,
        friend_user_id: Uuid,
        created_on: DateTime<Utc>,
    ) -> Uuid {
        let edge = Friendship {
            id: Uuid::new_v4(),
            user_id,
            friend_user_id,
            created_on,
            is_deleted: false,
        };
        let id = edge.id;
        self.state.lock().unwrap().friendships.push(edge);
        id
    }

    /// Raw post row, including soft-deleted ones.
    pub fn post_row(&self, post_id: Uuid) -> Option<Post> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
    }

    pub fn user_row(&self, user_id: Uuid) -> Option<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.user_row(user_id))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.users.iter_mut().find(|u| u.id == user.id) {
            existing.profile_picture_url = user.profile_picture_url.clone();
            existing.cover_picture_url = user.cover_picture_url.clone();
        }
        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        self.guard_writes()?;
        self.state.lock().unwrap().posts.push(post.clone());
        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|post| post.id == post_id && !post.is_deleted)
            .cloned())
    }

    async fn find_posts_by_user(&self, user_id: Uuid) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter(|post| post.user_id == user_id && !post.is_deleted)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(posts)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter(|post| !post.is_deleted)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        match state
            .posts
            .iter_mut()
            .find(|p| p.id == post.id && !p.is_deleted)
        {
            Some(existing) => {
                existing.content = post.content.clone();
                existing.visibility = post.visibility;
                existing.modified_on = post.modified_on;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete_post(&self, post_id: Uuid, deleted_on: DateTime<Utc>) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        match state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id && !p.is_deleted)
        {
            Some(post) => {
                post.is_deleted = true;
                post.deleted_on = Some(deleted_on);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search_posts(&self, term: &str, order: PostOrdering) -> Result<Vec<Post>> {
        let needle = term.to_lowercase();
        let mut posts: Vec<Post> = self
            .state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter(|post| !post.is_deleted && post.content.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        match order {
            PostOrdering::ContentAsc => posts.sort_by(|a, b| a.content.cmp(&b.content)),
            PostOrdering::ContentDesc => posts.sort_by(|a, b| b.content.cmp(&a.content)),
            PostOrdering::MostRecent => posts.sort_by(|a, b| b.created_on.cmp(&a.created_on)),
        }

        Ok(posts)
    }

    async fn replace_photo(&self, photo: &Photo) -> Result<()> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        state.videos.retain(|video| video.post_id != photo.post_id);
        state.photos.retain(|p| p.post_id != photo.post_id);
        state.photos.push(photo.clone());
        Ok(())
    }

    async fn replace_video(&self, video: &Video) -> Result<()> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        state.photos.retain(|photo| photo.post_id != video.post_id);
        state.videos.retain(|v| v.post_id != video.post_id);
        state.videos.push(video.clone());
        Ok(())
    }

    async fn clear_media(&self, post_id: Uuid) -> Result<()> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        state.photos.retain(|photo| photo.post_id != post_id);
        state.videos.retain(|video| video.post_id != post_id);
        Ok(())
    }

    async fn find_photo_by_post(&self, post_id: Uuid) -> Result<Option<Photo>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .photos
            .iter()
            .find(|photo| photo.post_id == post_id)
            .cloned())
    }

    async fn find_video_by_post(&self, post_id: Uuid) -> Result<Option<Video>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .videos
            .iter()
            .find(|video| video.post_id == post_id)
            .cloned())
    }

    async fn find_friendships(&self, user_id: Uuid) -> Result<Vec<Friendship>> {
        let mut friendships: Vec<Friendship> = self
            .state
            .lock()
            .unwrap()
            .friendships
            .iter()
            .filter(|edge| edge.user_id == user_id && !edge.is_deleted)
            .cloned()
            .collect();
        friendships.sort_by(|a, b| a.created_on.cmp(&b.created_on));
        Ok(friendships)
    }

    async fn find_friendship(
        &self,
        user_id: Uuid,
        friend_user_id: Uuid,
    ) -> Result<Option<Friendship>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .friendships
            .iter()
            .find(|edge| edge.user_id == user_id && edge.friend_user_id == friend_user_id)
            .cloned())
    }

    async fn insert_friendship(&self, friendship: &Friendship) -> Result<()> {
        self.guard_writes()?;
        self.state.lock().unwrap().friendships.push(friendship.clone());
        Ok(())
    }

    async fn update_friendship(&self, friendship: &Friendship) -> Result<()> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.friendships.iter_mut().find(|e| e.id == friendship.id) {
            existing.is_deleted = friendship.is_deleted;
        }
        Ok(())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.guard_writes()?;
        self.state.lock().unwrap().comments.push(comment.clone());
        Ok(())
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .comments
            .iter()
            .find(|comment| comment.id == comment_id && !comment.is_deleted)
            .cloned())
    }

    async fn find_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .state
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id && !comment.is_deleted)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_on.cmp(&b.created_on));
        Ok(comments)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        match state
            .comments
            .iter_mut()
            .find(|c| c.id == comment.id && !c.is_deleted)
        {
            Some(existing) => {
                existing.content = comment.content.clone();
                existing.modified_on = comment.modified_on;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete_comment(
        &self,
        comment_id: Uuid,
        deleted_on: DateTime<Utc>,
    ) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        match state
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id && !c.is_deleted)
        {
            Some(comment) => {
                comment.is_deleted = true;
                comment.deleted_on = Some(deleted_on);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_like(&self, like: &Like) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        let exists = state
            .likes
            .iter()
            .any(|l| l.post_id == like.post_id && l.user_id == like.user_id);
        if exists {
            return Ok(false);
        }
        state.likes.push(like.clone());
        Ok(true)
    }

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.guard_writes()?;
        let mut state = self.state.lock().unwrap();
        let before = state.likes.len();
        state
            .likes
            .retain(|like| !(like.post_id == post_id && like.user_id == user_id));
        Ok(state.likes.len() < before)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .likes
            .iter()
            .filter(|like| like.post_id == post_id)
            .count() as i64)
    }
}

/// Media store double that records uploads and can be told to fail.
#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: Mutex<Vec<String>>,
    upload_calls: AtomicUsize,
    fail: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn uploaded_urls(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, _bytes: Vec<u8>, file_name: &str) -> std::result::Result<String, MediaStoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MediaStoreError::new("injected upload failure"));
        }
        let url = format!("https://cdn.test/{}", file_name);
        self.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }
}

/// Wire a post service onto fresh doubles.
pub fn post_service_setup() -> (Arc<InMemoryRepository>, Arc<InMemoryMediaStore>, PostService) {
    init_tracing();
    let repository = InMemoryRepository::new();
    let media = InMemoryMediaStore::new();
    let service = PostService::new(
        repository.clone() as Arc<dyn ContentRepository>,
        media.clone() as Arc<dyn MediaStore>,
        EntityMapper::new(),
    );
    (repository, media, service)
}

/// Convenience: a record shaped like what `edit` expects.
pub fn record_for_edit(record: &PostRecord, content: &str, visibility: Visibility) -> PostRecord {
    PostRecord {
        content: content.to_string(),
        visibility,
        ..record.clone()
    }
}
