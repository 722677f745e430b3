use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::projects::models::{Project, ProjectTask, Sprint, WorkStatus};

/// One member of a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectMemberDto {
    pub user_id: Uuid,
    pub name: String,
    pub assigned_at: DateTime<Utc>,
}

/// Response DTO for a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub members: Vec<ProjectMemberDto>,
}

impl ProjectResponseDto {
    pub fn from_project(p: Project, members: Vec<ProjectMemberDto>) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            image_url: p.image_url,
            start_date: p.start_date,
            end_date: p.end_date,
            members,
        }
    }
}

/// Request DTO for creating a project
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(url)]
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

/// Request DTO for editing a project; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Response DTO for a sprint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SprintResponseDto {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<Sprint> for SprintResponseDto {
    fn from(s: Sprint) -> Self {
        Self {
            id: s.id,
            project_id: s.project_id,
            name: s.name,
            description: s.description,
            status: s.status,
            start_date: s.start_date,
            end_date: s.end_date,
        }
    }
}

/// Request DTO for creating a sprint
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSprintDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request DTO for editing a sprint; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSprintDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Response DTO for a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskResponseDto {
    pub id: Uuid,
    pub sprint_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub assigned_to_id: Option<Uuid>,
}

impl From<ProjectTask> for TaskResponseDto {
    fn from(t: ProjectTask) -> Self {
        Self {
            id: t.id,
            sprint_id: t.sprint_id,
            title: t.title,
            description: t.description,
            status: t.status,
            assigned_to_id: t.assigned_to_id,
        }
    }
}

/// Request DTO for creating a task
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub assigned_to_id: Option<Uuid>,
}

/// Request DTO for editing a task; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    pub assigned_to_id: Option<Uuid>,
}
