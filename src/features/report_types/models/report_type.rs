use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a report type.
///
/// Report types form the configurable catalog of required stage documents
/// ("Journal de bord", "Bilan version 1", ...). The active entries, ordered
/// by `display_order`, define the steps of every stagiaire's timeline;
/// `days_from_start` is the due-date offset from the stage launch anchor.
#[derive(Debug, Clone, FromRow)]
pub struct ReportType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub days_from_start: i32,
    pub icon_class: Option<String>,
    pub color: Option<String>,
    pub is_auto_generated: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
