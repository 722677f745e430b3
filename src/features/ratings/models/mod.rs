mod rating;

pub use rating::{evaluation_kind_for, EvaluationKind, RatingDetails, RatingStatus};
