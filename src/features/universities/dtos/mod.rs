mod university_dto;

pub use university_dto::{SaveUniversityDto, UniversityResponseDto};
