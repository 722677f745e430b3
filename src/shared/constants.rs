/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

/// Maximum size for an uploaded report or CV file (15MB)
pub const MAX_UPLOAD_SIZE: usize = 15 * 1024 * 1024;

/// MIME types accepted for report and CV uploads
pub const ALLOWED_DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Returns true when the content type is an accepted document format
pub fn is_document_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_DOCUMENT_MIME_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_mime_types() {
        assert!(is_document_mime_type_allowed("application/pdf"));
        assert!(!is_document_mime_type_allowed("image/png"));
        assert!(!is_document_mime_type_allowed(""));
    }
}
