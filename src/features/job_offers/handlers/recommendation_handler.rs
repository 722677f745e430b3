use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireStaff;
use crate::features::job_offers::dtos::{
    GenerateRecommendationsQuery, GenerateRecommendationsResultDto,
    JobOfferWithRecommendationsDto, RecommendationResponseDto, UpdateRecommendationStatusDto,
};
use crate::features::job_offers::services::{JobOfferService, RecommendationService};
use crate::shared::types::ApiResponse;

/// Shared state for the recommendation endpoints
#[derive(Clone)]
pub struct RecommendationState {
    pub job_offer_service: Arc<JobOfferService>,
    pub recommendation_service: Arc<RecommendationService>,
}

/// Generate candidate recommendations for a job offer
///
/// Cached results are returned unless `regenerate` is set. When the external
/// engine is unreachable or fails, the response degrades to
/// `success = false` with the error string instead of a 5xx, so the client
/// can keep the rest of the offer page functional.
#[utoipa::path(
    post,
    path = "/api/job-offers/{id}/recommendations/generate",
    params(
        ("id" = Uuid, Path, description = "Job offer id"),
        GenerateRecommendationsQuery
    ),
    responses(
        (status = 200, description = "Generation outcome", body = ApiResponse<GenerateRecommendationsResultDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recommendations"
)]
pub async fn generate_recommendations(
    RequireStaff(_user): RequireStaff,
    State(state): State<RecommendationState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerateRecommendationsQuery>,
) -> Result<Json<ApiResponse<GenerateRecommendationsResultDto>>> {
    let result = state
        .recommendation_service
        .generate(id, query.top_n, query.regenerate)
        .await;

    let outcome = match result {
        Ok(recommendations) => GenerateRecommendationsResultDto {
            success: true,
            recommendations,
            error: None,
        },
        // Engine failures degrade gracefully; everything else propagates
        Err(AppError::ExternalServiceError(message)) => GenerateRecommendationsResultDto {
            success: false,
            recommendations: Vec::new(),
            error: Some(message),
        },
        Err(other) => return Err(other),
    };

    Ok(Json(ApiResponse::success(Some(outcome), None, None)))
}

/// Stored recommendations for a job offer
#[utoipa::path(
    get,
    path = "/api/job-offers/{id}/recommendations",
    params(("id" = Uuid, Path, description = "Job offer id")),
    responses(
        (status = 200, description = "Stored recommendations", body = ApiResponse<Vec<RecommendationResponseDto>>),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recommendations"
)]
pub async fn list_recommendations(
    RequireStaff(_user): RequireStaff,
    State(state): State<RecommendationState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<RecommendationResponseDto>>>> {
    let recommendations = state.recommendation_service.list_for_offer(id).await?;
    Ok(Json(ApiResponse::success(Some(recommendations), None, None)))
}

/// A job offer together with its stored recommendations
#[utoipa::path(
    get,
    path = "/api/job-offers/{id}/with-recommendations",
    params(("id" = Uuid, Path, description = "Job offer id")),
    responses(
        (status = 200, description = "Offer with recommendations", body = ApiResponse<JobOfferWithRecommendationsDto>),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recommendations"
)]
pub async fn get_offer_with_recommendations(
    RequireStaff(_user): RequireStaff,
    State(state): State<RecommendationState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobOfferWithRecommendationsDto>>> {
    let offer = state.job_offer_service.get_by_id(id).await?;
    let result = state
        .recommendation_service
        .offer_with_recommendations(id, offer)
        .await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Update the tracking status of a recommendation
#[utoipa::path(
    put,
    path = "/api/recommendations/{id}/status",
    params(("id" = Uuid, Path, description = "Recommendation id")),
    request_body = UpdateRecommendationStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<RecommendationResponseDto>),
        (status = 404, description = "Recommendation not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recommendations"
)]
pub async fn update_recommendation_status(
    RequireStaff(_user): RequireStaff,
    State(state): State<RecommendationState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateRecommendationStatusDto>,
) -> Result<Json<ApiResponse<RecommendationResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let recommendation = state.recommendation_service.update_status(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(recommendation), None, None)))
}

/// Drop all stored recommendations for a job offer
#[utoipa::path(
    delete,
    path = "/api/job-offers/{id}/recommendations",
    params(("id" = Uuid, Path, description = "Job offer id")),
    responses(
        (status = 200, description = "Recommendations cleared"),
        (status = 404, description = "Job offer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recommendations"
)]
pub async fn delete_recommendations(
    RequireStaff(_user): RequireStaff,
    State(state): State<RecommendationState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.recommendation_service.delete_for_offer(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Recommendations cleared".to_string()),
        None,
    )))
}
