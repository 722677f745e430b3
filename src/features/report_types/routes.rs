use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::report_types::handlers;
use crate::features::report_types::services::ReportTypeService;

/// Create routes for the report types feature
pub fn routes(service: Arc<ReportTypeService>) -> Router {
    Router::new()
        .route(
            "/api/report-types",
            get(handlers::list_report_types).post(handlers::create_report_type),
        )
        .route(
            "/api/report-types/active",
            get(handlers::list_active_report_types),
        )
        .route(
            "/api/report-types/{id}",
            get(handlers::get_report_type)
                .put(handlers::update_report_type)
                .delete(handlers::delete_report_type),
        )
        .with_state(service)
}
