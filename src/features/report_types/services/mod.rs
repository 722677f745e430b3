mod report_type_service;

pub use report_type_service::ReportTypeService;
