use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Post row joined with the author's name and engagement counters, as seen
/// by one viewer
#[derive(Debug, Clone, FromRow)]
pub struct PostDetails {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
}

/// File attached to a publication
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct PostAttachment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub file_key: String,
    pub file_url: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

/// Comment on a publication
#[derive(Debug, Clone, FromRow)]
pub struct PostComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub comment: String,
    pub commented_at: DateTime<Utc>,
    pub commenter_name: String,
}
