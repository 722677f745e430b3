use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{
    CvDownloadDto, CvUploadedDto, ListUsersQuery, UpdateProfileDto, UpdateSkillsDto,
    UserResponseDto,
};
use crate::features::users::models::{User, UserRole};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{is_document_mime_type_allowed, MAX_PAGE_SIZE};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, phone_number, role, \
     profile_picture_url, tuteur_id, years_experience, department_id, university_id, \
     start_date, end_date, stage_kind, student_level, skills, cv_file_key, \
     cv_original_filename, cv_uploaded_at, is_active, created_at, updated_at";

/// Service for user profiles, tutor assignment and CV handling
pub struct UserService {
    pool: PgPool,
    object_store: Arc<ObjectStore>,
}

impl UserService {
    pub fn new(pool: PgPool, object_store: Arc<ObjectStore>) -> Self {
        Self { pool, object_store }
    }

    /// List users with optional role/department filters, paginated
    pub async fn list(&self, query: &ListUsersQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let limit = query.page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (query.page.max(1) - 1) * limit;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE is_active = TRUE \
               AND ($1::user_role IS NULL OR role = $1) \
               AND ($2::uuid IS NULL OR department_id = $2) \
             ORDER BY last_name, first_name \
             LIMIT $3 OFFSET $4"
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(query.role)
            .bind(query.department_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE is_active = TRUE \
               AND ($1::user_role IS NULL OR role = $1) \
               AND ($2::uuid IS NULL OR department_id = $2)",
        )
        .bind(query.role)
        .bind(query.department_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    /// Get a user by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponseDto> {
        let user = self.fetch_user(id).await?;
        Ok(user.into())
    }

    /// Update the caller's own profile fields
    pub async fn update_profile(&self, user_id: Uuid, dto: UpdateProfileDto) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 phone_number = COALESCE($4, phone_number), \
                 profile_picture_url = COALESCE($5, profile_picture_url), \
                 updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.first_name)
        .bind(dto.last_name)
        .bind(dto.phone_number)
        .bind(dto.profile_picture_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", user_id)))?;

        Ok(user.into())
    }

    /// Update a stagiaire's skills (used by the recommendation engine as
    /// matching input)
    pub async fn update_skills(&self, user_id: Uuid, dto: UpdateSkillsDto) -> Result<UserResponseDto> {
        let user = self.fetch_user(user_id).await?;
        if user.role != UserRole::Stagiaire {
            return Err(AppError::Validation(
                "Skills can only be set on stagiaire profiles".to_string(),
            ));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET skills = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.into())
    }

    /// Assign a tuteur to a stagiaire (staff operation)
    pub async fn assign_tuteur(&self, stagiaire_id: Uuid, tuteur_id: Uuid) -> Result<UserResponseDto> {
        let stagiaire = self.fetch_user(stagiaire_id).await?;
        if stagiaire.role != UserRole::Stagiaire {
            return Err(AppError::Validation(format!(
                "User '{}' is not a stagiaire",
                stagiaire_id
            )));
        }

        let tuteur = self.fetch_user(tuteur_id).await?;
        if tuteur.role != UserRole::Tuteur {
            return Err(AppError::Validation(format!(
                "User '{}' is not a tuteur",
                tuteur_id
            )));
        }

        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET tuteur_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(stagiaire_id)
        .bind(tuteur_id)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Tuteur {} assigned to stagiaire {}",
            tuteur_id, stagiaire_id
        );

        Ok(updated.into())
    }

    /// List the stagiaires supervised by a tuteur
    pub async fn list_stagiaires_of(&self, tuteur_id: Uuid) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE tuteur_id = $1 AND is_active = TRUE \
             ORDER BY last_name, first_name"
        ))
        .bind(tuteur_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Store a stagiaire's CV and record its metadata.
    ///
    /// Replaces any previously uploaded CV (old object is removed).
    pub async fn upload_cv(
        &self,
        user_id: Uuid,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
    ) -> Result<CvUploadedDto> {
        if !is_document_mime_type_allowed(content_type) {
            return Err(AppError::Validation(format!(
                "Unsupported CV format: {}",
                content_type
            )));
        }

        let user = self.fetch_user(user_id).await?;
        if user.role != UserRole::Stagiaire {
            return Err(AppError::Validation(
                "Only stagiaires can upload a CV".to_string(),
            ));
        }

        let extension = original_filename.rsplit('.').next().unwrap_or("pdf");
        let file_key = self.object_store.cv_key(user_id, extension);

        self.object_store
            .upload(&file_key, data, content_type)
            .await?;

        // Remove the previous CV object, if any
        if let Some(old_key) = &user.cv_file_key {
            if let Err(e) = self.object_store.delete(old_key).await {
                tracing::warn!("Failed to delete previous CV '{}': {}", old_key, e);
            }
        }

        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 cv_file_key = $2, \
                 cv_original_filename = $3, \
                 cv_uploaded_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&file_key)
        .bind(original_filename)
        .fetch_one(&self.pool)
        .await?;

        info!("CV uploaded for stagiaire {}: {}", user_id, file_key);

        Ok(CvUploadedDto {
            original_filename: updated
                .cv_original_filename
                .unwrap_or_else(|| original_filename.to_string()),
            uploaded_at: updated.cv_uploaded_at.unwrap_or_else(chrono::Utc::now),
        })
    }

    /// Presigned download URL for a stagiaire's CV.
    ///
    /// Accessible to the stagiaire themselves, their tuteur, and staff.
    pub async fn cv_download_url(
        &self,
        requester: &AuthenticatedUser,
        user_id: Uuid,
    ) -> Result<CvDownloadDto> {
        let user = self.fetch_user(user_id).await?;

        let is_own = requester.user_id == user_id;
        let is_their_tuteur = user.tuteur_id == Some(requester.user_id);
        if !is_own && !is_their_tuteur && !requester.has_staff_access() {
            return Err(AppError::Forbidden(
                "You do not have permission to access this CV".to_string(),
            ));
        }

        let file_key = user
            .cv_file_key
            .ok_or_else(|| AppError::NotFound("No CV uploaded for this user".to_string()))?;

        let download_url = self.object_store.get_presigned_url(&file_key).await?;

        Ok(CvDownloadDto {
            download_url,
            original_filename: user.cv_original_filename.unwrap_or_else(|| "cv".to_string()),
        })
    }

    /// Soft-deactivate a user (admin operation)
    pub async fn deactivate(&self, user_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User '{}' not found", user_id)));
        }

        info!("User {} deactivated", user_id);
        Ok(())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))
    }
}
