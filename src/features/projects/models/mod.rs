mod project;

pub use project::{Project, ProjectMember, ProjectTask, Sprint, WorkStatus};
