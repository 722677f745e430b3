use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::posts::models::{PostAttachment, PostComment};

/// One attachment of a publication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostAttachmentDto {
    pub id: Uuid,
    pub file_url: String,
    pub file_type: String,
}

impl From<PostAttachment> for PostAttachmentDto {
    fn from(a: PostAttachment) -> Self {
        Self {
            id: a.id,
            file_url: a.file_url,
            file_type: a.file_type,
        }
    }
}

/// Response DTO for a publication as seen by the caller
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponseDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<PostAttachmentDto>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_me: bool,
}

/// Response DTO for a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostCommentDto {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub commenter_name: String,
    pub comment: String,
    pub commented_at: DateTime<Utc>,
}

impl From<PostComment> for PostCommentDto {
    fn from(c: PostComment) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            commenter_name: c.commenter_name,
            comment: c.comment,
            commented_at: c.commented_at,
        }
    }
}

/// Attachment reference passed when creating a post (previously uploaded
/// through the attachment endpoint)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostAttachmentInputDto {
    pub file_key: String,
    pub file_url: String,
    pub file_type: String,
}

/// Request DTO for creating a publication
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<PostAttachmentInputDto>,
}

/// Request DTO for commenting on a publication
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Response DTO after uploading an attachment
#[derive(Debug, Serialize, ToSchema)]
pub struct AttachmentUploadedDto {
    pub file_key: String,
    pub file_url: String,
    pub file_type: String,
}
