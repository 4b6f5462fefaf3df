//! Postgres implementation of the content repository
use super::{ContentRepository, PostOrdering};
use crate::error::Result;
use crate::models::{Comment, Friendship, Like, Photo, Post, User, Video};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

const POST_COLUMNS: &str =
    "id, user_id, content, visibility, created_on, modified_on, deleted_on, is_deleted";

pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(pool: &PgPool) -> Result<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for PostgresRepository {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, profile_picture_url, cover_picture_url, created_on
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET profile_picture_url = $2, cover_picture_url = $3
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.profile_picture_url)
        .bind(&user.cover_picture_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_post(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, content, visibility, created_on, modified_on, deleted_on, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.content)
        .bind(post.visibility)
        .bind(post.created_on)
        .bind(post.modified_on)
        .bind(post.deleted_on)
        .bind(post.is_deleted)
        .execute(&self.pool)
        .await?;

        debug!(post_id = %post.id, user_id = %post.user_id, "post row inserted");

        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND is_deleted = FALSE"
        );

        let post = sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_posts_by_user(&self, user_id: Uuid) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE user_id = $1 AND is_deleted = FALSE \
             ORDER BY created_on DESC"
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE is_deleted = FALSE \
             ORDER BY created_on DESC"
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = $2, visibility = $3, modified_on = $4
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(post.visibility)
        .bind(post.modified_on)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_post(&self, post_id: Uuid, deleted_on: DateTime<Utc>) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET is_deleted = TRUE, deleted_on = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(post_id)
        .bind(deleted_on)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_posts(&self, term: &str, order: PostOrdering) -> Result<Vec<Post>> {
        let order_clause = match order {
            PostOrdering::ContentAsc => "content ASC",
            PostOrdering::ContentDesc => "content DESC",
            PostOrdering::MostRecent => "created_on DESC",
        };

        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE is_deleted = FALSE AND content ILIKE $1 \
             ORDER BY {order_clause}"
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(format!("%{}%", term))
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn replace_photo(&self, photo: &Photo) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM videos WHERE post_id = $1")
            .bind(photo.post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM photos WHERE post_id = $1")
            .bind(photo.post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO photos (id, url, post_id) VALUES ($1, $2, $3)")
            .bind(photo.id)
            .bind(&photo.url)
            .bind(photo.post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn replace_video(&self, video: &Video) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM photos WHERE post_id = $1")
            .bind(video.post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM videos WHERE post_id = $1")
            .bind(video.post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO videos (id, url, post_id) VALUES ($1, $2, $3)")
            .bind(video.id)
            .bind(&video.url)
            .bind(video.post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear_media(&self, post_id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM photos WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM videos WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_photo_by_post(&self, post_id: Uuid) -> Result<Option<Photo>> {
        let photo = sqlx::query_as::<_, Photo>(
            "SELECT id, url, post_id FROM photos WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    async fn find_video_by_post(&self, post_id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT id, url, post_id FROM videos WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_friendships(&self, user_id: Uuid) -> Result<Vec<Friendship>> {
        let friendships = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user_id, friend_user_id, created_on, is_deleted
            FROM friendships
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY created_on ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(friendships)
    }

    async fn find_friendship(
        &self,
        user_id: Uuid,
        friend_user_id: Uuid,
    ) -> Result<Option<Friendship>> {
        let friendship = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user_id, friend_user_id, created_on, is_deleted
            FROM friendships
            WHERE user_id = $1 AND friend_user_id = $2
            "#,
        )
        .bind(user_id)
        .bind(friend_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(friendship)
    }

    async fn insert_friendship(&self, friendship: &Friendship) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO friendships (id, user_id, friend_user_id, created_on, is_deleted)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(friendship.id)
        .bind(friendship.user_id)
        .bind(friendship.friend_user_id)
        .bind(friendship.created_on)
        .bind(friendship.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_friendship(&self, friendship: &Friendship) -> Result<()> {
        sqlx::query("UPDATE friendships SET is_deleted = $2 WHERE id = $1")
            .bind(friendship.id)
            .bind(friendship.is_deleted)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, user_id, content, created_on, modified_on, deleted_on, is_deleted)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.created_on)
        .bind(comment.modified_on)
        .bind(comment.deleted_on)
        .bind(comment.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, content, created_on, modified_on, deleted_on, is_deleted
            FROM comments
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, content, created_on, modified_on, deleted_on, is_deleted
            FROM comments
            WHERE post_id = $1 AND is_deleted = FALSE
            ORDER BY created_on ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn update_comment(&self, comment: &Comment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $2, modified_on = $3
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.modified_on)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_comment(
        &self,
        comment_id: Uuid,
        deleted_on: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET is_deleted = TRUE, deleted_on = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(comment_id)
        .bind(deleted_on)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_like(&self, like: &Like) -> Result<bool> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO likes (id, post_id, user_id, created_on)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (post_id, user_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(like.id)
        .bind(like.post_id)
        .bind(like.user_id)
        .bind(like.created_on)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }

    async fn delete_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_likes(&self, post_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM likes WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
