mod rating_dto;

pub use rating_dto::{
    CreateRatingDto, RatingResponseDto, RatingResponseInputDto, RatingStatsDto, RejectRatingDto,
    UpdateRatingDto,
};
