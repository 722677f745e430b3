mod report;
mod stage_timeline;

pub use report::{Report, ReportDetails};
pub use stage_timeline::{NewStageTimeline, StageTimeline};
