mod job_offer_dto;

pub use job_offer_dto::{
    CreateJobOfferDto, GenerateRecommendationsQuery, GenerateRecommendationsResultDto,
    JobOfferResponseDto, JobOfferWithRecommendationsDto, RecommendationResponseDto,
    UpdateJobOfferDto, UpdateRecommendationStatusDto,
};
