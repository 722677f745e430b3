use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::projects::dtos::{
    CreateProjectDto, CreateSprintDto, CreateTaskDto, ProjectResponseDto, SprintResponseDto,
    TaskResponseDto, UpdateProjectDto, UpdateSprintDto, UpdateTaskDto,
};
use crate::features::projects::services::ProjectService;
use crate::shared::types::ApiResponse;

/// Create a project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<ProjectResponseDto>),
        (status = 403, description = "Staff access required")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn create_project(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    AppJson(dto): AppJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let project = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(project), None, None)),
    ))
}

/// List all projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects", body = ApiResponse<Vec<ProjectResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn list_projects(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects = service.list().await?;
    Ok(Json(ApiResponse::success(Some(projects), None, None)))
}

/// Projects the caller is a member of
#[utoipa::path(
    get,
    path = "/api/projects/mine",
    responses(
        (status = 200, description = "Own projects", body = ApiResponse<Vec<ProjectResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn list_my_projects(
    user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects = service.list_for_member(user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(projects), None, None)))
}

/// Get a project by id
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project found", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn get_project(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn update_project(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProjectDto>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let project = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

/// Add a member to a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}/members/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Project id"),
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Member added", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn add_project_member(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.add_member(id, user_id).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

/// Remove a member from a project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}/members/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Project id"),
        ("user_id" = Uuid, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Member removed", body = ApiResponse<ProjectResponseDto>),
        (status = 404, description = "Membership not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn remove_project_member(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.remove_member(id, user_id).await?;
    Ok(Json(ApiResponse::success(Some(project), None, None)))
}

/// Delete a project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn delete_project(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Project deleted".to_string()),
        None,
    )))
}

/// Create a sprint in a project
#[utoipa::path(
    post,
    path = "/api/projects/{id}/sprints",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = CreateSprintDto,
    responses(
        (status = 201, description = "Sprint created", body = ApiResponse<SprintResponseDto>),
        (status = 404, description = "Project not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn create_sprint(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateSprintDto>,
) -> Result<(StatusCode, Json<ApiResponse<SprintResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let sprint = service.create_sprint(id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(sprint), None, None)),
    ))
}

/// List the sprints of a project
#[utoipa::path(
    get,
    path = "/api/projects/{id}/sprints",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Sprints", body = ApiResponse<Vec<SprintResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn list_sprints(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SprintResponseDto>>>> {
    let sprints = service.list_sprints(id).await?;
    Ok(Json(ApiResponse::success(Some(sprints), None, None)))
}

/// Update a sprint
#[utoipa::path(
    put,
    path = "/api/sprints/{id}",
    params(("id" = Uuid, Path, description = "Sprint id")),
    request_body = UpdateSprintDto,
    responses(
        (status = 200, description = "Sprint updated", body = ApiResponse<SprintResponseDto>),
        (status = 404, description = "Sprint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn update_sprint(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSprintDto>,
) -> Result<Json<ApiResponse<SprintResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let sprint = service.update_sprint(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(sprint), None, None)))
}

/// Delete a sprint
#[utoipa::path(
    delete,
    path = "/api/sprints/{id}",
    params(("id" = Uuid, Path, description = "Sprint id")),
    responses(
        (status = 200, description = "Sprint deleted"),
        (status = 404, description = "Sprint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn delete_sprint(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_sprint(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Sprint deleted".to_string()),
        None,
    )))
}

/// Create a task in a sprint
#[utoipa::path(
    post,
    path = "/api/sprints/{id}/tasks",
    params(("id" = Uuid, Path, description = "Sprint id")),
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<TaskResponseDto>),
        (status = 404, description = "Sprint not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn create_task(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateTaskDto>,
) -> Result<(StatusCode, Json<ApiResponse<TaskResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let task = service.create_task(id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(task), None, None)),
    ))
}

/// List the tasks of a sprint
#[utoipa::path(
    get,
    path = "/api/sprints/{id}/tasks",
    params(("id" = Uuid, Path, description = "Sprint id")),
    responses(
        (status = 200, description = "Tasks", body = ApiResponse<Vec<TaskResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn list_tasks(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TaskResponseDto>>>> {
    let tasks = service.list_tasks(id).await?;
    Ok(Json(ApiResponse::success(Some(tasks), None, None)))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskResponseDto>),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn update_task(
    _user: AuthenticatedUser,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTaskDto>,
) -> Result<Json<ApiResponse<TaskResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let task = service.update_task(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(task), None, None)))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Task not found")
    ),
    security(("bearer_auth" = [])),
    tag = "projects"
)]
pub async fn delete_task(
    RequireStaff(_user): RequireStaff,
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_task(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Task deleted".to_string()),
        None,
    )))
}
