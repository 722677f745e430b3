use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::report_types::models::ReportType;

/// Response DTO for a report type
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportTypeResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub days_from_start: i32,
    pub icon_class: Option<String>,
    pub color: Option<String>,
    pub is_auto_generated: bool,
    pub is_active: bool,
}

impl From<ReportType> for ReportTypeResponseDto {
    fn from(rt: ReportType) -> Self {
        Self {
            id: rt.id,
            name: rt.name,
            description: rt.description,
            display_order: rt.display_order,
            days_from_start: rt.days_from_start,
            icon_class: rt.icon_class,
            color: rt.color,
            is_auto_generated: rt.is_auto_generated,
            is_active: rt.is_active,
        }
    }
}

/// Request DTO for creating a report type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportTypeDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub display_order: i32,
    /// Due-date offset in days from the stage launch anchor
    #[validate(range(min = 0, max = 730))]
    pub days_from_start: i32,
    pub icon_class: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub is_auto_generated: bool,
}

/// Request DTO for updating a report type; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReportTypeDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub display_order: Option<i32>,
    #[validate(range(min = 0, max = 730))]
    pub days_from_start: Option<i32>,
    pub icon_class: Option<String>,
    pub color: Option<String>,
    pub is_auto_generated: Option<bool>,
    pub is_active: Option<bool>,
}
