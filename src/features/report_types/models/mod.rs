mod report_type;

pub use report_type::ReportType;
