mod report_dto;
mod timeline_dto;

pub use report_dto::{
    ReportDownloadDto, ReportResponseDto, ResubmitReportDto, ReviewReportDto, UploadReportDto,
};
pub use timeline_dto::{
    StageTimelineDto, TimelineDto, TimelineStepDto, TimelineStepStatus, UpdateStageTimelineDto,
};
