use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::projects::dtos::{
    CreateProjectDto, CreateSprintDto, CreateTaskDto, ProjectMemberDto, ProjectResponseDto,
    SprintResponseDto, TaskResponseDto, UpdateProjectDto, UpdateSprintDto, UpdateTaskDto,
};
use crate::features::projects::models::{Project, ProjectMember, ProjectTask, Sprint};

const PROJECT_COLUMNS: &str =
    "id, title, description, image_url, start_date, end_date, created_at, updated_at";

const SPRINT_COLUMNS: &str =
    "id, project_id, name, description, status, start_date, end_date, created_at, updated_at";

const TASK_COLUMNS: &str =
    "id, sprint_id, title, description, status, assigned_to_id, created_at, updated_at";

/// Service for projects, their sprints and tasks
pub struct ProjectService {
    pool: PgPool,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// Create a project and assign the initial members
    pub async fn create(&self, dto: CreateProjectDto) -> Result<ProjectResponseDto> {
        let mut tx = self.pool.begin().await?;

        let project_id: Uuid = sqlx::query_scalar(
            "INSERT INTO projects (title, description, image_url, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(&mut *tx)
        .await?;

        for member_id in &dto.member_ids {
            sqlx::query(
                "INSERT INTO project_members (project_id, user_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(project_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!("Project created: {}", project_id);

        self.get_by_id(project_id).await
    }

    /// List all projects
    pub async fn list(&self) -> Result<Vec<ProjectResponseDto>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(projects.len());
        for project in projects {
            let members = self.fetch_members(project.id).await?;
            result.push(ProjectResponseDto::from_project(project, members));
        }

        Ok(result)
    }

    /// Projects the given user is a member of
    pub async fn list_for_member(&self, user_id: Uuid) -> Result<Vec<ProjectResponseDto>> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects p \
             WHERE EXISTS (SELECT 1 FROM project_members pm \
                           WHERE pm.project_id = p.id AND pm.user_id = $1) \
             ORDER BY p.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(projects.len());
        for project in projects {
            let members = self.fetch_members(project.id).await?;
            result.push(ProjectResponseDto::from_project(project, members));
        }

        Ok(result)
    }

    /// Get a project by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProjectResponseDto> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{}' not found", id)))?;

        let members = self.fetch_members(id).await?;
        Ok(ProjectResponseDto::from_project(project, members))
    }

    /// Update project details
    pub async fn update(&self, id: Uuid, dto: UpdateProjectDto) -> Result<ProjectResponseDto> {
        let updated = sqlx::query(
            "UPDATE projects SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 image_url = COALESCE($4, image_url), \
                 start_date = COALESCE($5, start_date), \
                 end_date = COALESCE($6, end_date), \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.image_url)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project '{}' not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Add a member to a project
    pub async fn add_member(&self, project_id: Uuid, user_id: Uuid) -> Result<ProjectResponseDto> {
        self.get_by_id(project_id).await?;

        sqlx::query(
            "INSERT INTO project_members (project_id, user_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(project_id).await
    }

    /// Remove a member from a project
    pub async fn remove_member(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<ProjectResponseDto> {
        let removed =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        if removed.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "User is not a member of this project".to_string(),
            ));
        }

        self.get_by_id(project_id).await
    }

    /// Delete a project with its sprints and tasks (cascade)
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project '{}' not found", id)));
        }

        info!("Project deleted: {}", id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sprints
    // ------------------------------------------------------------------

    /// Create a sprint in a project
    pub async fn create_sprint(
        &self,
        project_id: Uuid,
        dto: CreateSprintDto,
    ) -> Result<SprintResponseDto> {
        self.get_by_id(project_id).await?;

        if dto.end_date < dto.start_date {
            return Err(AppError::Validation(
                "Sprint end date cannot precede its start date".to_string(),
            ));
        }

        let sprint = sqlx::query_as::<_, Sprint>(&format!(
            "INSERT INTO sprints (project_id, name, description, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SPRINT_COLUMNS}"
        ))
        .bind(project_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(sprint.into())
    }

    /// Sprints of a project, chronological
    pub async fn list_sprints(&self, project_id: Uuid) -> Result<Vec<SprintResponseDto>> {
        let sprints = sqlx::query_as::<_, Sprint>(&format!(
            "SELECT {SPRINT_COLUMNS} FROM sprints WHERE project_id = $1 ORDER BY start_date"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sprints.into_iter().map(|s| s.into()).collect())
    }

    /// Update a sprint
    pub async fn update_sprint(
        &self,
        sprint_id: Uuid,
        dto: UpdateSprintDto,
    ) -> Result<SprintResponseDto> {
        let sprint = sqlx::query_as::<_, Sprint>(&format!(
            "UPDATE sprints SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 status = COALESCE($4, status), \
                 start_date = COALESCE($5, start_date), \
                 end_date = COALESCE($6, end_date), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {SPRINT_COLUMNS}"
        ))
        .bind(sprint_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.status)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_optional(&self.pool)
        .await?;

        sprint
            .map(|s| s.into())
            .ok_or_else(|| AppError::NotFound(format!("Sprint '{}' not found", sprint_id)))
    }

    /// Delete a sprint and its tasks (cascade)
    pub async fn delete_sprint(&self, sprint_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sprints WHERE id = $1")
            .bind(sprint_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Sprint '{}' not found",
                sprint_id
            )));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Create a task in a sprint
    pub async fn create_task(&self, sprint_id: Uuid, dto: CreateTaskDto) -> Result<TaskResponseDto> {
        let sprint: Option<Uuid> = sqlx::query_scalar("SELECT id FROM sprints WHERE id = $1")
            .bind(sprint_id)
            .fetch_optional(&self.pool)
            .await?;
        if sprint.is_none() {
            return Err(AppError::NotFound(format!(
                "Sprint '{}' not found",
                sprint_id
            )));
        }

        let task = sqlx::query_as::<_, ProjectTask>(&format!(
            "INSERT INTO project_tasks (sprint_id, title, description, assigned_to_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(sprint_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.assigned_to_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task.into())
    }

    /// Tasks of a sprint
    pub async fn list_tasks(&self, sprint_id: Uuid) -> Result<Vec<TaskResponseDto>> {
        let tasks = sqlx::query_as::<_, ProjectTask>(&format!(
            "SELECT {TASK_COLUMNS} FROM project_tasks WHERE sprint_id = $1 ORDER BY created_at"
        ))
        .bind(sprint_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks.into_iter().map(|t| t.into()).collect())
    }

    /// Update a task
    pub async fn update_task(&self, task_id: Uuid, dto: UpdateTaskDto) -> Result<TaskResponseDto> {
        let task = sqlx::query_as::<_, ProjectTask>(&format!(
            "UPDATE project_tasks SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 status = COALESCE($4, status), \
                 assigned_to_id = COALESCE($5, assigned_to_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.status)
        .bind(dto.assigned_to_id)
        .fetch_optional(&self.pool)
        .await?;

        task.map(|t| t.into())
            .ok_or_else(|| AppError::NotFound(format!("Task '{}' not found", task_id)))
    }

    /// Delete a task
    pub async fn delete_task(&self, task_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM project_tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task '{}' not found", task_id)));
        }

        Ok(())
    }

    async fn fetch_members(&self, project_id: Uuid) -> Result<Vec<ProjectMemberDto>> {
        let members = sqlx::query_as::<_, ProjectMember>(
            "SELECT pm.project_id, pm.user_id, pm.assigned_at, \
                 (u.first_name || ' ' || u.last_name) AS member_name \
             FROM project_members pm \
             JOIN users u ON u.id = pm.user_id \
             WHERE pm.project_id = $1 \
             ORDER BY pm.assigned_at",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members
            .into_iter()
            .map(|m| ProjectMemberDto {
                user_id: m.user_id,
                name: m.member_name,
                assigned_at: m.assigned_at,
            })
            .collect())
    }
}
