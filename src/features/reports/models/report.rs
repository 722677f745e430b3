use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a submitted stage document.
///
/// A row is created on upload and only ever mutated by the approve/reject
/// transition, which sets one of the terminal flags. Resubmission after a
/// rejection creates a fresh row linked through `previous_report_id`; the
/// rejected row is kept untouched as an audit trail.
///
/// Invariant: at most one pending row (`is_submitted` and neither terminal
/// flag set) exists per (stagiaire_id, report_type_id) pair, and the two
/// terminal flags are mutually exclusive.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Report {
    pub id: Uuid,
    pub stagiaire_id: Uuid,
    pub report_type_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
    pub submission_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub is_submitted: bool,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub feedback_comments: Option<String>,
    pub approver_id: Option<Uuid>,
    pub previous_report_id: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// A report awaiting review: submitted but neither approved nor rejected
    pub fn is_pending(&self) -> bool {
        self.is_submitted && !self.is_approved && !self.is_rejected
    }
}

/// Report row joined with the report type and user names, for API responses
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ReportDetails {
    pub id: Uuid,
    pub stagiaire_id: Uuid,
    pub report_type_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
    pub submission_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub is_submitted: bool,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub feedback_comments: Option<String>,
    pub approver_id: Option<Uuid>,
    pub previous_report_id: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub report_type_name: String,
    pub stagiaire_name: String,
    pub approver_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_flags(is_submitted: bool, is_approved: bool, is_rejected: bool) -> Report {
        Report {
            id: Uuid::new_v4(),
            stagiaire_id: Uuid::new_v4(),
            report_type_id: Uuid::new_v4(),
            title: "Journal de bord".to_string(),
            description: None,
            file_key: "private/reports/x.pdf".to_string(),
            submission_date: Utc::now(),
            due_date: None,
            is_submitted,
            is_approved,
            is_rejected,
            feedback_comments: None,
            approver_id: None,
            previous_report_id: None,
            reviewed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_pending() {
        assert!(report_with_flags(true, false, false).is_pending());
        assert!(!report_with_flags(true, true, false).is_pending());
        assert!(!report_with_flags(true, false, true).is_pending());
        assert!(!report_with_flags(false, false, false).is_pending());
    }
}
