use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::posts::dtos::{
    AttachmentUploadedDto, CreatePostDto, PostAttachmentDto, PostCommentDto, PostResponseDto,
};
use crate::features::posts::models::{PostAttachment, PostComment, PostDetails};
use crate::modules::storage::ObjectStore;
use crate::shared::types::PaginationQuery;

/// MIME types accepted as publication attachments
const ALLOWED_ATTACHMENT_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "application/pdf",
];

/// Per-viewer joined select for the feed
const POST_DETAIL_SELECT: &str = "SELECT p.id, p.author_id, p.content, p.created_at, \
     (u.first_name || ' ' || u.last_name) AS author_name, \
     (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS like_count, \
     (SELECT COUNT(*) FROM post_comments pc WHERE pc.post_id = p.id) AS comment_count, \
     EXISTS (SELECT 1 FROM post_likes pl WHERE pl.post_id = p.id AND pl.user_id = $1) \
         AS liked_by_viewer \
     FROM posts p \
     JOIN users u ON u.id = p.author_id";

/// Service for the publication feed
pub struct PostService {
    pool: PgPool,
    object_store: Arc<ObjectStore>,
}

impl PostService {
    pub fn new(pool: PgPool, object_store: Arc<ObjectStore>) -> Self {
        Self { pool, object_store }
    }

    /// Store a publication attachment and return its public URL
    pub async fn upload_attachment(
        &self,
        author_id: Uuid,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<AttachmentUploadedDto> {
        if !ALLOWED_ATTACHMENT_MIME_TYPES.contains(&content_type) {
            return Err(AppError::Validation(format!(
                "Unsupported attachment format: {}",
                content_type
            )));
        }

        let extension = original_filename.rsplit('.').next().unwrap_or("bin");
        let file_key = self.object_store.post_attachment_key(author_id, extension);

        self.object_store
            .upload(&file_key, data, content_type)
            .await?;

        Ok(AttachmentUploadedDto {
            file_url: self.object_store.get_file_url(&file_key),
            file_key,
            file_type: content_type.to_string(),
        })
    }

    /// Publish a post with its (already uploaded) attachments
    pub async fn create(
        &self,
        author_id: Uuid,
        dto: CreatePostDto,
    ) -> Result<PostResponseDto> {
        let mut tx = self.pool.begin().await?;

        let post_id: Uuid = sqlx::query_scalar(
            "INSERT INTO posts (author_id, content) VALUES ($1, $2) RETURNING id",
        )
        .bind(author_id)
        .bind(&dto.content)
        .fetch_one(&mut *tx)
        .await?;

        for attachment in &dto.attachments {
            sqlx::query(
                "INSERT INTO post_attachments (post_id, file_key, file_url, file_type) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(post_id)
            .bind(&attachment.file_key)
            .bind(&attachment.file_url)
            .bind(&attachment.file_type)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Post published: id={}, author={}", post_id, author_id);

        self.get_by_id(post_id, author_id).await
    }

    /// Paginated feed, newest first, with per-viewer like state
    pub async fn feed(
        &self,
        viewer_id: Uuid,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<PostResponseDto>, i64)> {
        let posts = sqlx::query_as::<_, PostDetails>(&format!(
            "{POST_DETAIL_SELECT} ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(viewer_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        let mut result = Vec::with_capacity(posts.len());
        for post in posts {
            let attachments = self.fetch_attachments(post.id).await?;
            result.push(Self::to_response(post, attachments));
        }

        Ok((result, total))
    }

    /// Get one post as seen by the viewer
    pub async fn get_by_id(&self, post_id: Uuid, viewer_id: Uuid) -> Result<PostResponseDto> {
        let post = sqlx::query_as::<_, PostDetails>(&format!(
            "{POST_DETAIL_SELECT} WHERE p.id = $2"
        ))
        .bind(viewer_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", post_id)))?;

        let attachments = self.fetch_attachments(post_id).await?;
        Ok(Self::to_response(post, attachments))
    }

    /// Like a post; liking twice is a no-op
    pub async fn like(&self, post_id: Uuid, user_id: Uuid) -> Result<PostResponseDto> {
        self.ensure_post_exists(post_id).await?;

        sqlx::query(
            "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(post_id, user_id).await
    }

    /// Remove a like
    pub async fn unlike(&self, post_id: Uuid, user_id: Uuid) -> Result<PostResponseDto> {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        self.get_by_id(post_id, user_id).await
    }

    /// Comment on a post
    pub async fn comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        comment: &str,
    ) -> Result<PostCommentDto> {
        self.ensure_post_exists(post_id).await?;

        let comment_id: Uuid = sqlx::query_scalar(
            "INSERT INTO post_comments (post_id, user_id, comment) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, PostComment>(
            "SELECT pc.id, pc.post_id, pc.user_id, pc.comment, pc.commented_at, \
                 (u.first_name || ' ' || u.last_name) AS commenter_name \
             FROM post_comments pc \
             JOIN users u ON u.id = pc.user_id \
             WHERE pc.id = $1",
        )
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Comments of a post, oldest first
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<PostCommentDto>> {
        self.ensure_post_exists(post_id).await?;

        let comments = sqlx::query_as::<_, PostComment>(
            "SELECT pc.id, pc.post_id, pc.user_id, pc.comment, pc.commented_at, \
                 (u.first_name || ' ' || u.last_name) AS commenter_name \
             FROM post_comments pc \
             JOIN users u ON u.id = pc.user_id \
             WHERE pc.post_id = $1 \
             ORDER BY pc.commented_at",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments.into_iter().map(|c| c.into()).collect())
    }

    /// Delete a comment (author of the comment or admin)
    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<()> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM post_comments WHERE id = $1")
                .bind(comment_id)
                .fetch_optional(&self.pool)
                .await?;

        let owner = owner
            .ok_or_else(|| AppError::NotFound(format!("Comment '{}' not found", comment_id)))?;
        if owner != user.user_id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author can delete this comment".to_string(),
            ));
        }

        sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a post with its attachments, likes and comments
    pub async fn delete(&self, post_id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        let author: Option<Uuid> = sqlx::query_scalar("SELECT author_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        let author =
            author.ok_or_else(|| AppError::NotFound(format!("Post '{}' not found", post_id)))?;
        if author != user.user_id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only the author can delete this post".to_string(),
            ));
        }

        // Remove stored attachment objects before the rows cascade away
        let attachments = self.fetch_attachments(post_id).await?;
        for attachment in &attachments {
            if let Err(e) = self.object_store.delete(&attachment.file_key).await {
                tracing::warn!(
                    "Failed to delete attachment object '{}': {}",
                    attachment.file_key,
                    e
                );
            }
        }

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        info!("Post deleted: {}", post_id);
        Ok(())
    }

    fn to_response(post: PostDetails, attachments: Vec<PostAttachment>) -> PostResponseDto {
        PostResponseDto {
            id: post.id,
            author_id: post.author_id,
            author_name: post.author_name,
            content: post.content,
            created_at: post.created_at,
            attachments: attachments
                .into_iter()
                .map(PostAttachmentDto::from)
                .collect(),
            like_count: post.like_count,
            comment_count: post.comment_count,
            liked_by_me: post.liked_by_viewer,
        }
    }

    async fn fetch_attachments(&self, post_id: Uuid) -> Result<Vec<PostAttachment>> {
        let attachments = sqlx::query_as::<_, PostAttachment>(
            "SELECT id, post_id, file_key, file_url, file_type, created_at \
             FROM post_attachments WHERE post_id = $1 ORDER BY created_at",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attachments)
    }

    async fn ensure_post_exists(&self, post_id: Uuid) -> Result<()> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        if exists.is_none() {
            return Err(AppError::NotFound(format!("Post '{}' not found", post_id)));
        }

        Ok(())
    }
}
