//! Comment service
use crate::dto::CommentRecord;
use crate::error::{AppError, Result};
use crate::mapper::EntityMapper;
use crate::models::Comment;
use crate::repository::ContentRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

pub struct CommentService {
    repository: Arc<dyn ContentRepository>,
    mapper: EntityMapper,
}

impl CommentService {
    pub fn new(repository: Arc<dyn ContentRepository>, mapper: EntityMapper) -> Self {
        Self { repository, mapper }
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> Result<CommentRecord> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "comment content must not be blank".to_string(),
            ));
        }

        self.repository
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} does not exist", post_id)))?;
        self.repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", user_id)))?;

        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content,
            created_on: Utc::now(),
            modified_on: None,
            deleted_on: None,
            is_deleted: false,
        };
        self.repository.insert_comment(&comment).await?;

        Ok(self.mapper.comment_to_record(&comment))
    }

    pub async fn edit_comment(&self, comment_id: Uuid, content: String) -> Result<CommentRecord> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "comment content must not be blank".to_string(),
            ));
        }

        let mut comment = self
            .repository
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {} does not exist", comment_id)))?;

        comment.content = content;
        comment.modified_on = Some(Utc::now());
        self.repository.update_comment(&comment).await?;

        Ok(self.mapper.comment_to_record(&comment))
    }

    /// Soft-delete a comment. Same lenient boolean contract as post delete:
    /// a missing comment and a store failure both come back as `false`.
    pub async fn delete_comment(&self, comment_id: Uuid) -> bool {
        match self
            .repository
            .soft_delete_comment(comment_id, Utc::now())
            .await
        {
            Ok(deleted) => deleted,
            Err(err) => {
                warn!(%comment_id, "comment delete failed: {}", err);
                false
            }
        }
    }

    /// Non-deleted comments on a post, oldest first.
    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>> {
        self.repository
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} does not exist", post_id)))?;

        let comments = self.repository.find_comments_by_post(post_id).await?;

        Ok(comments
            .iter()
            .map(|comment| self.mapper.comment_to_record(comment))
            .collect())
    }
}
