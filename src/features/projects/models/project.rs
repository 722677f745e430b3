use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Database model for a project stagiaires are assigned to
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership row linking users to projects
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ProjectMember {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub member_name: String,
}

/// Shared three-state progress for sprints and tasks, stored as the
/// `work_status` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Todo,
    InProgress,
    Done,
}

/// Database model for a sprint within a project
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Sprint {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for a task within a sprint
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ProjectTask {
    pub id: Uuid,
    pub sprint_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub assigned_to_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
