use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{StageKind, StudentLevel, User, UserRole};
use crate::shared::validation::PHONE_REGEX;

/// Response DTO for a user profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub profile_picture_url: Option<String>,
    pub tuteur_id: Option<Uuid>,
    pub years_experience: Option<i32>,
    pub department_id: Option<Uuid>,
    pub university_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stage_kind: Option<StageKind>,
    pub student_level: Option<StudentLevel>,
    pub skills: Option<String>,
    pub has_cv: bool,
    pub cv_original_filename: Option<String>,
    pub cv_uploaded_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            phone_number: u.phone_number,
            role: u.role,
            profile_picture_url: u.profile_picture_url,
            tuteur_id: u.tuteur_id,
            years_experience: u.years_experience,
            department_id: u.department_id,
            university_id: u.university_id,
            start_date: u.start_date,
            end_date: u.end_date,
            stage_kind: u.stage_kind,
            student_level: u.student_level,
            skills: u.skills,
            has_cv: u.cv_file_key.is_some(),
            cv_original_filename: u.cv_original_filename,
            cv_uploaded_at: u.cv_uploaded_at,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Query params for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Filter by role
    pub role: Option<UserRole>,
    /// Filter by department
    pub department_id: Option<Uuid>,
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    crate::shared::constants::DEFAULT_PAGE_SIZE
}

/// Request DTO for updating one's own profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(regex(path = *PHONE_REGEX))]
    pub phone_number: Option<String>,
    #[validate(url)]
    pub profile_picture_url: Option<String>,
}

/// Request DTO for updating a stagiaire's skills
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSkillsDto {
    /// Comma-separated list of skills (e.g. "Rust, SQL, Docker")
    #[validate(length(min = 1, max = 2000))]
    pub skills: String,
}

/// Request DTO for assigning a tuteur to a stagiaire
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTuteurDto {
    pub tuteur_id: Uuid,
}

/// Response DTO after a CV upload
#[derive(Debug, Serialize, ToSchema)]
pub struct CvUploadedDto {
    pub original_filename: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Response DTO carrying a presigned CV download URL
#[derive(Debug, Serialize, ToSchema)]
pub struct CvDownloadDto {
    pub download_url: String,
    pub original_filename: String,
}
