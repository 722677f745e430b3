use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::departments::models::Department;

/// Response DTO for a department
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponseDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Department> for DepartmentResponseDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
        }
    }
}

/// Request DTO for creating or renaming a department
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveDepartmentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
