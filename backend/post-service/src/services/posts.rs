//! Post service - post authoring, media attachment, retrieval, and search
use crate::config::PictureKindPolicy;
use crate::dto::{FileUpload, PhotoRecord, PostDraft, PostRecord, VideoRecord};
use crate::error::{AppError, Result};
use crate::mapper::EntityMapper;
use crate::models::{Photo, Post, Video, Visibility};
use crate::repository::{ContentRepository, PostOrdering};
use chrono::Utc;
use media_store::MediaStore;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct PostService {
    repository: Arc<dyn ContentRepository>,
    media_store: Arc<dyn MediaStore>,
    mapper: EntityMapper,
    picture_kind_policy: PictureKindPolicy,
}

impl PostService {
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        media_store: Arc<dyn MediaStore>,
        mapper: EntityMapper,
    ) -> Self {
        Self {
            repository,
            media_store,
            mapper,
            picture_kind_policy: PictureKindPolicy::Lenient,
        }
    }

    pub fn with_picture_kind_policy(
        repository: Arc<dyn ContentRepository>,
        media_store: Arc<dyn MediaStore>,
        mapper: EntityMapper,
        picture_kind_policy: PictureKindPolicy,
    ) -> Self {
        Self {
            repository,
            media_store,
            mapper,
            picture_kind_policy,
        }
    }

    /// Create a post, optionally attaching exactly one of an uploaded file,
    /// an existing photo reference, or an existing video reference.
    ///
    /// The attachment resolves by first-match precedence: uploaded file,
    /// then photo reference, then video reference, then none. The post row
    /// and the media linkage are two sequential durable writes, not one
    /// transaction; a crash between them leaves a post without media, which
    /// readers tolerate.
    pub async fn create(
        &self,
        draft: PostDraft,
        upload: Option<FileUpload>,
        photo: Option<PhotoRecord>,
        video: Option<VideoRecord>,
    ) -> Result<PostRecord> {
        if draft.content.trim().is_empty()
            && upload.is_none()
            && photo.is_none()
            && video.is_none()
        {
            return Err(AppError::Validation(
                "a post needs text content or a media attachment".to_string(),
            ));
        }

        let author = self
            .repository
            .find_user(draft.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", draft.user_id)))?;

        let post = self
            .mapper
            .post_from_draft(&draft, Uuid::new_v4(), Utc::now());
        self.repository.insert_post(&post).await?;

        let (photo, video) = self.attach_media(post.id, upload, photo, video).await?;

        debug!(post_id = %post.id, user_id = %author.id, "post created");

        Ok(self
            .mapper
            .post_to_record(&post, photo.as_ref(), video.as_ref()))
    }

    /// Soft-delete a post. Best-effort: a missing post and a store failure
    /// both come back as `false`, with the failure detail logged here and
    /// nowhere else.
    pub async fn delete(&self, post_id: Uuid) -> bool {
        match self.repository.soft_delete_post(post_id, Utc::now()).await {
            Ok(deleted) => deleted,
            Err(err) => {
                warn!(%post_id, "post delete failed: {}", err);
                false
            }
        }
    }

    /// Fetch a single non-deleted post.
    pub async fn get_by_id(&self, post_id: Uuid) -> Result<PostRecord> {
        let post = self
            .repository
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} does not exist", post_id)))?;

        self.hydrate(&post).await
    }

    /// All non-deleted posts by a user. An empty result set is an error by
    /// contract, unlike `search`.
    pub async fn get_by_owner(&self, user_id: Uuid) -> Result<Vec<PostRecord>> {
        let posts = self.repository.find_posts_by_user(user_id).await?;

        if posts.is_empty() {
            return Err(AppError::NotFound(format!(
                "user {} has no posts",
                user_id
            )));
        }

        self.hydrate_all(&posts).await
    }

    /// Posts authored by the user's friends: each friend's posts (newest
    /// first) concatenated in friendship-creation order. No pagination, no
    /// dedup across duplicate edges, no global time-merge.
    pub async fn friends_feed(&self, user_id: Uuid) -> Result<Vec<PostRecord>> {
        let friendships = self.repository.find_friendships(user_id).await?;

        let mut feed = Vec::new();
        for friendship in &friendships {
            let posts = self
                .repository
                .find_posts_by_user(friendship.friend_user_id)
                .await?;
            for post in &posts {
                feed.push(self.hydrate(post).await?);
            }
        }

        Ok(feed)
    }

    /// Case-insensitive substring search over post content.
    ///
    /// `sort_order` follows the public API contract: "nameAsc" and
    /// "nameDesc" sort by content, anything else sorts newest-first. Zero
    /// matches is success.
    pub async fn search(&self, term: &str, sort_order: &str) -> Result<Vec<PostRecord>> {
        if term.trim().is_empty() {
            return Err(AppError::Validation(
                "search term must not be blank".to_string(),
            ));
        }

        let posts = self
            .repository
            .search_posts(term, PostOrdering::from_sort_order(sort_order))
            .await?;

        self.hydrate_all(&posts).await
    }

    /// Edit a post's content and visibility. Author and media are immutable
    /// through this path regardless of what the record carries.
    pub async fn edit(&self, record: PostRecord) -> Result<PostRecord> {
        let mut post = self
            .repository
            .find_post(record.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} does not exist", record.id)))?;

        post.content = record.content;
        post.visibility = record.visibility;
        post.modified_on = Some(Utc::now());

        self.repository.update_post(&post).await?;

        self.hydrate(&post).await
    }

    /// Upload a picture, publish it as a new post, and point the user's
    /// profile or cover picture at it.
    ///
    /// Under the lenient policy an unrecognized `picture_kind` still
    /// publishes the post but leaves the user record untouched; the strict
    /// policy rejects it up front.
    pub async fn change_display_picture(
        &self,
        file: FileUpload,
        user_id: Uuid,
        picture_kind: &str,
    ) -> Result<PostRecord> {
        if self.picture_kind_policy == PictureKindPolicy::Strict
            && !matches!(picture_kind, "profile" | "cover")
        {
            return Err(AppError::Validation(format!(
                "unknown picture kind '{}'",
                picture_kind
            )));
        }

        let mut user = self
            .repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", user_id)))?;

        let url = self.media_store.upload(file.bytes, &file.file_name).await?;

        let draft = PostDraft {
            user_id,
            content: String::new(),
            visibility: Visibility::Public,
        };
        let record = self
            .create(draft, None, Some(PhotoRecord { url: url.clone() }), None)
            .await?;

        match picture_kind {
            "profile" => {
                user.profile_picture_url = Some(url);
                self.repository.update_user(&user).await?;
            }
            "cover" => {
                user.cover_picture_url = Some(url);
                self.repository.update_user(&user).await?;
            }
            other => {
                debug!(user_id = %user.id, kind = other, "unrecognized picture kind ignored");
            }
        }

        Ok(record)
    }

    /// Every non-deleted post, newest first.
    pub async fn list_all(&self) -> Result<Vec<PostRecord>> {
        let posts = self.repository.list_posts().await?;
        self.hydrate_all(&posts).await
    }

    /// Resolve the media attachment, keeping photo and video mutually
    /// exclusive. The upload happens before any linkage so a failed or
    /// cancelled transfer never leaves a media row pointing at bytes that
    /// were never stored.
    async fn attach_media(
        &self,
        post_id: Uuid,
        upload: Option<FileUpload>,
        photo: Option<PhotoRecord>,
        video: Option<VideoRecord>,
    ) -> Result<(Option<Photo>, Option<Video>)> {
        if let Some(file) = upload {
            let url = self.media_store.upload(file.bytes, &file.file_name).await?;
            let photo = self
                .mapper
                .photo_from_record(&PhotoRecord { url }, Uuid::new_v4(), post_id);
            self.repository.replace_photo(&photo).await?;
            Ok((Some(photo), None))
        } else if let Some(record) = photo {
            let photo = self
                .mapper
                .photo_from_record(&record, Uuid::new_v4(), post_id);
            self.repository.replace_photo(&photo).await?;
            Ok((Some(photo), None))
        } else if let Some(record) = video {
            let video = self
                .mapper
                .video_from_record(&record, Uuid::new_v4(), post_id);
            self.repository.replace_video(&video).await?;
            Ok((None, Some(video)))
        } else {
            self.repository.clear_media(post_id).await?;
            Ok((None, None))
        }
    }

    async fn hydrate(&self, post: &Post) -> Result<PostRecord> {
        let photo = self.repository.find_photo_by_post(post.id).await?;
        let video = self.repository.find_video_by_post(post.id).await?;

        Ok(self
            .mapper
            .post_to_record(post, photo.as_ref(), video.as_ref()))
    }

    async fn hydrate_all(&self, posts: &[Post]) -> Result<Vec<PostRecord>> {
        let mut records = Vec::with_capacity(posts.len());
        for post in posts {
            records.push(self.hydrate(post).await?);
        }
        Ok(records)
    }
}
