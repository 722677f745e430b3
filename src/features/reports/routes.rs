use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::reports::handlers;
use crate::features::reports::services::{ReportService, TimelineService};
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Create routes for the reports feature
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports)
                .post(handlers::upload_report)
                // Allow body size up to MAX_UPLOAD_SIZE + buffer for multipart overhead
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .route("/api/reports/mine", get(handlers::list_my_reports))
        .route("/api/reports/pending", get(handlers::list_pending_reports))
        .route(
            "/api/reports/stagiaire/{id}",
            get(handlers::list_stagiaire_reports),
        )
        .route(
            "/api/reports/{id}",
            get(handlers::get_report).delete(handlers::delete_report),
        )
        .route(
            "/api/reports/{id}/resubmit",
            post(handlers::resubmit_report)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .route("/api/reports/{id}/approve", put(handlers::approve_report))
        .route("/api/reports/{id}/reject", put(handlers::reject_report))
        .route("/api/reports/{id}/download", get(handlers::download_report))
        .with_state(report_service)
}

/// Create routes for the derived timeline endpoints
pub fn timeline_routes(timeline_service: Arc<TimelineService>) -> Router {
    Router::new()
        .route("/api/timeline/mine", get(handlers::get_my_timeline))
        .route(
            "/api/timeline/{stagiaire_id}",
            get(handlers::get_stagiaire_timeline),
        )
        .route(
            "/api/timeline/{stagiaire_id}/anchors",
            get(handlers::get_timeline_anchors).put(handlers::update_timeline_anchors),
        )
        .with_state(timeline_service)
}
