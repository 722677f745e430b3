use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Platform roles, stored as the `user_role` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Rh,
    Tuteur,
    Stagiaire,
}

/// Kind of internship a stagiaire is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stage_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    StageEte,
    StagePfe,
}

/// Academic level of a stagiaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "student_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StudentLevel {
    Ingenierie,
    Licence,
    Master,
}

/// Database model for a platform user.
///
/// Tuteur-specific fields (`years_experience`) and stagiaire-specific fields
/// (`tuteur_id`, `university_id`, stage period, skills, CV) are nullable and
/// only populated for the matching role. Credentials are not stored here;
/// authentication is delegated to the identity provider.
#[derive(Debug, Clone, FromRow)]
pub struct User {
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
    pub cv_file_key: Option<String>,
    pub cv_original_filename: Option<String>,
    pub cv_uploaded_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
