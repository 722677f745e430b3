mod user_dto;

pub use user_dto::{
    AssignTuteurDto, CvDownloadDto, CvUploadedDto, ListUsersQuery, UpdateProfileDto,
    UpdateSkillsDto, UserResponseDto,
};
