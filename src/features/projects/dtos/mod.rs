mod project_dto;

pub use project_dto::{
    CreateProjectDto, CreateSprintDto, CreateTaskDto, ProjectMemberDto, ProjectResponseDto,
    SprintResponseDto, TaskResponseDto, UpdateProjectDto, UpdateSprintDto, UpdateTaskDto,
};
