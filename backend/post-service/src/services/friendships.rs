//! Friendship service - directed friend edges between users
use crate::error::{AppError, Result};
use crate::models::Friendship;
use crate::repository::ContentRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

pub struct FriendshipService {
    repository: Arc<dyn ContentRepository>,
}

impl FriendshipService {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    /// Idempotent create; returns true if a new edge appeared. A previously
    /// removed edge is revived rather than duplicated.
    pub async fn create_friendship(&self, user_id: Uuid, friend_user_id: Uuid) -> Result<bool> {
        if user_id == friend_user_id {
            return Err(AppError::Validation(
                "a user cannot befriend themselves".to_string(),
            ));
        }

        for id in [user_id, friend_user_id] {
            self.repository
                .find_user(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("user {} does not exist", id)))?;
        }

        match self
            .repository
            .find_friendship(user_id, friend_user_id)
            .await?
        {
            Some(edge) if !edge.is_deleted => Ok(false),
            Some(mut edge) => {
                edge.is_deleted = false;
                self.repository.update_friendship(&edge).await?;
                debug!(%user_id, %friend_user_id, "friendship revived");
                Ok(true)
            }
            None => {
                let edge = Friendship {
                    id: Uuid::new_v4(),
                    user_id,
                    friend_user_id,
                    created_on: Utc::now(),
                    is_deleted: false,
                };
                self.repository.insert_friendship(&edge).await?;
                debug!(%user_id, %friend_user_id, "friendship created");
                Ok(true)
            }
        }
    }

    /// Idempotent soft delete; returns true if an active edge was removed.
    pub async fn remove_friendship(&self, user_id: Uuid, friend_user_id: Uuid) -> Result<bool> {
        match self
            .repository
            .find_friendship(user_id, friend_user_id)
            .await?
        {
            Some(mut edge) if !edge.is_deleted => {
                edge.is_deleted = true;
                self.repository.update_friendship(&edge).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
