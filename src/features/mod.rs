pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod job_offers;
pub mod meetings;
pub mod notifications;
pub mod posts;
pub mod projects;
pub mod ratings;
pub mod report_types;
pub mod reports;
pub mod universities;
pub mod users;
