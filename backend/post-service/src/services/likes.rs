//! Like service
use crate::error::{AppError, Result};
use crate::models::Like;
use crate::repository::ContentRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct LikeService {
    repository: Arc<dyn ContentRepository>,
}

impl LikeService {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Idempotent like; returns true if the like was new.
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.repository
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} does not exist", post_id)))?;
        self.repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", user_id)))?;

        let like = Like {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            created_on: Utc::now(),
        };

        self.repository.insert_like(&like).await
    }

    /// Idempotent unlike; returns true if a like was removed.
    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.repository.delete_like(post_id, user_id).await
    }

    pub async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        self.repository.count_likes(post_id).await
    }
}
