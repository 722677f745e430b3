use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::report_types::dtos::{
    CreateReportTypeDto, ReportTypeResponseDto, UpdateReportTypeDto,
};
use crate::features::report_types::models::ReportType;

const REPORT_TYPE_COLUMNS: &str = "id, name, description, display_order, days_from_start, \
     icon_class, color, is_auto_generated, is_active, created_at, updated_at";

/// Service for the report type catalog
pub struct ReportTypeService {
    pool: PgPool,
}

impl ReportTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all report types ordered by display order (ties broken by id)
    pub async fn list_all(&self) -> Result<Vec<ReportTypeResponseDto>> {
        let types = sqlx::query_as::<_, ReportType>(&format!(
            "SELECT {REPORT_TYPE_COLUMNS} FROM report_types ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list report types: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(types.into_iter().map(|rt| rt.into()).collect())
    }

    /// List active report types ordered by display order (ties broken by id)
    pub async fn list_active(&self) -> Result<Vec<ReportTypeResponseDto>> {
        let types = sqlx::query_as::<_, ReportType>(&format!(
            "SELECT {REPORT_TYPE_COLUMNS} FROM report_types \
             WHERE is_active = TRUE \
             ORDER BY display_order, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(types.into_iter().map(|rt| rt.into()).collect())
    }

    /// Get report type by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ReportTypeResponseDto> {
        let report_type = sqlx::query_as::<_, ReportType>(&format!(
            "SELECT {REPORT_TYPE_COLUMNS} FROM report_types WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        report_type
            .map(|rt| rt.into())
            .ok_or_else(|| AppError::NotFound(format!("Report type '{}' not found", id)))
    }

    /// Create a report type; names are unique case-insensitively
    pub async fn create(&self, dto: CreateReportTypeDto) -> Result<ReportTypeResponseDto> {
        if self.name_exists(&dto.name, None).await? {
            return Err(AppError::Conflict(format!(
                "A report type named '{}' already exists",
                dto.name
            )));
        }

        let report_type = sqlx::query_as::<_, ReportType>(&format!(
            "INSERT INTO report_types \
                 (name, description, display_order, days_from_start, icon_class, color, is_auto_generated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {REPORT_TYPE_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.display_order)
        .bind(dto.days_from_start)
        .bind(&dto.icon_class)
        .bind(&dto.color)
        .bind(dto.is_auto_generated)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Report type created: {} ({})", report_type.name, report_type.id);

        Ok(report_type.into())
    }

    /// Update a report type; absent fields are left unchanged
    pub async fn update(&self, id: Uuid, dto: UpdateReportTypeDto) -> Result<ReportTypeResponseDto> {
        if let Some(name) = &dto.name {
            if self.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "A report type named '{}' already exists",
                    name
                )));
            }
        }

        let report_type = sqlx::query_as::<_, ReportType>(&format!(
            "UPDATE report_types SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 display_order = COALESCE($4, display_order), \
                 days_from_start = COALESCE($5, days_from_start), \
                 icon_class = COALESCE($6, icon_class), \
                 color = COALESCE($7, color), \
                 is_auto_generated = COALESCE($8, is_auto_generated), \
                 is_active = COALESCE($9, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {REPORT_TYPE_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.display_order)
        .bind(dto.days_from_start)
        .bind(&dto.icon_class)
        .bind(&dto.color)
        .bind(dto.is_auto_generated)
        .bind(dto.is_active)
        .fetch_optional(&self.pool)
        .await?;

        report_type
            .map(|rt| rt.into())
            .ok_or_else(|| AppError::NotFound(format!("Report type '{}' not found", id)))
    }

    /// Delete a report type; fails when reports reference it
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM report_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    AppError::Conflict(
                        "Report type has submitted reports; deactivate it instead".to_string(),
                    )
                }
                other => AppError::Database(other),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Report type '{}' not found",
                id
            )));
        }

        tracing::info!("Report type deleted: {}", id);
        Ok(())
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM report_types \
             WHERE LOWER(name) = LOWER($1) AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }
}
