use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::universities::dtos::UniversityResponseDto;
use crate::features::universities::models::University;

/// Service for the university catalog
pub struct UniversityService {
    pool: PgPool,
}

impl UniversityService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<UniversityResponseDto>> {
        let universities = sqlx::query_as::<_, University>(
            "SELECT id, name, created_at, updated_at FROM universities ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(universities.into_iter().map(|u| u.into()).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UniversityResponseDto> {
        let university = sqlx::query_as::<_, University>(
            "SELECT id, name, created_at, updated_at FROM universities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        university
            .map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("University '{}' not found", id)))
    }

    pub async fn create(&self, name: &str) -> Result<UniversityResponseDto> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM universities WHERE LOWER(name) = LOWER($1)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "University '{}' already exists",
                name
            )));
        }

        let university = sqlx::query_as::<_, University>(
            "INSERT INTO universities (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(university.into())
    }

    pub async fn update(&self, id: Uuid, name: &str) -> Result<UniversityResponseDto> {
        let university = sqlx::query_as::<_, University>(
            "UPDATE universities SET name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        university
            .map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("University '{}' not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM universities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Conflict("University is still referenced by users".to_string())
                }
                other => AppError::Database(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "University '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
