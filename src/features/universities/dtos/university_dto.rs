use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::universities::models::University;

/// Response DTO for a university
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UniversityResponseDto {
    pub id: Uuid,
    pub name: String,
}

impl From<University> for UniversityResponseDto {
    fn from(u: University) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

/// Request DTO for creating or renaming a university
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveUniversityDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}
