mod report_service;
pub mod timeline_service;

pub use report_service::ReportService;
pub use timeline_service::TimelineService;
