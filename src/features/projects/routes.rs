use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::projects::handlers;
use crate::features::projects::services::ProjectService;

/// Create routes for the projects feature
pub fn routes(service: Arc<ProjectService>) -> Router {
    Router::new()
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/api/projects/mine", get(handlers::list_my_projects))
        .route(
            "/api/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/projects/{id}/members/{user_id}",
            put(handlers::add_project_member).delete(handlers::remove_project_member),
        )
        .route(
            "/api/projects/{id}/sprints",
            get(handlers::list_sprints).post(handlers::create_sprint),
        )
        .route(
            "/api/sprints/{id}",
            put(handlers::update_sprint).delete(handlers::delete_sprint),
        )
        .route(
            "/api/sprints/{id}/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/{id}",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .with_state(service)
}
