mod report_type_dto;

pub use report_type_dto::{CreateReportTypeDto, ReportTypeResponseDto, UpdateReportTypeDto};
