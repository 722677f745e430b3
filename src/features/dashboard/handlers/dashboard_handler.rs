use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::DashboardOverviewDto;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Dashboard overview for the caller's role
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Role-dependent overview", body = ApiResponse<DashboardOverviewDto>),
    ),
    security(("bearer_auth" = [])),
    tag = "dashboard"
)]
pub async fn get_overview(
    user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardOverviewDto>>> {
    let overview = service.overview(&user).await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}
