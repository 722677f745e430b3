mod university_service;

pub use university_service::UniversityService;
