use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::departments::dtos::DepartmentResponseDto;
use crate::features::departments::models::Department;

/// Service for department catalog operations
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all departments
    pub async fn list(&self) -> Result<Vec<DepartmentResponseDto>> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, created_at, updated_at FROM departments ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list departments: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(departments.into_iter().map(|d| d.into()).collect())
    }

    /// Get department by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<DepartmentResponseDto> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, created_at, updated_at FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        department
            .map(|d| d.into())
            .ok_or_else(|| AppError::NotFound(format!("Department '{}' not found", id)))
    }

    /// Create a department (name must be unique)
    pub async fn create(&self, name: &str) -> Result<DepartmentResponseDto> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM departments WHERE LOWER(name) = LOWER($1)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Department '{}' already exists",
                name
            )));
        }

        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(department.into())
    }

    /// Rename a department
    pub async fn update(&self, id: Uuid, name: &str) -> Result<DepartmentResponseDto> {
        let department = sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        department
            .map(|d| d.into())
            .ok_or_else(|| AppError::NotFound(format!("Department '{}' not found", id)))
    }

    /// Delete a department; fails when users or job offers still reference it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Conflict(
                        "Department is still referenced by users or job offers".to_string(),
                    )
                }
                other => AppError::Database(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Department '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
