use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::ReportDetails;

/// Response DTO for a submitted report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub submission_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub is_submitted: bool,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub feedback_comments: Option<String>,
    pub report_type_id: Uuid,
    pub report_type_name: String,
    pub stagiaire_id: Uuid,
    pub stagiaire_name: String,
    pub approver_id: Option<Uuid>,
    pub approver_name: Option<String>,
    pub previous_report_id: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ReportDetails> for ReportResponseDto {
    fn from(r: ReportDetails) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            submission_date: r.submission_date,
            due_date: r.due_date,
            is_submitted: r.is_submitted,
            is_approved: r.is_approved,
            is_rejected: r.is_rejected,
            feedback_comments: r.feedback_comments,
            report_type_id: r.report_type_id,
            report_type_name: r.report_type_name,
            stagiaire_id: r.stagiaire_id,
            stagiaire_name: r.stagiaire_name,
            approver_id: r.approver_id,
            approver_name: r.approver_name,
            previous_report_id: r.previous_report_id,
            reviewed_at: r.reviewed_at,
            created_at: r.created_at,
        }
    }
}

/// Metadata fields accompanying a report upload (multipart form)
#[derive(Debug, Validate, ToSchema)]
pub struct UploadReportDto {
    pub report_type_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Metadata fields accompanying a resubmission (the report type is carried
/// over from the rejected report)
#[derive(Debug, Validate, ToSchema)]
pub struct ResubmitReportDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Request DTO for approving or rejecting a report
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewReportDto {
    #[validate(length(min = 1, max = 2000))]
    pub feedback: String,
}

/// Response DTO carrying a presigned report download URL
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportDownloadDto {
    pub download_url: String,
    pub title: String,
}
