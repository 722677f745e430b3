use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::departments::{dtos as departments_dtos, handlers as departments_handlers};
use crate::features::job_offers::{dtos as job_offers_dtos, handlers as job_offers_handlers};
use crate::features::meetings::{dtos as meetings_dtos, handlers as meetings_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers, models as notifications_models,
};
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::features::projects::{dtos as projects_dtos, handlers as projects_handlers};
use crate::features::ratings::{
    dtos as ratings_dtos, handlers as ratings_handlers, models as ratings_models,
};
use crate::features::report_types::{
    dtos as report_types_dtos, handlers as report_types_handlers,
};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::universities::{
    dtos as universities_dtos, handlers as universities_handlers,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::user_handler::list_users,
        users_handlers::user_handler::get_me,
        users_handlers::user_handler::update_me,
        users_handlers::user_handler::update_my_skills,
        users_handlers::user_handler::get_user,
        users_handlers::user_handler::assign_tuteur,
        users_handlers::user_handler::list_stagiaires,
        users_handlers::user_handler::upload_cv,
        users_handlers::user_handler::download_cv,
        users_handlers::user_handler::deactivate_user,
        // Departments
        departments_handlers::department_handler::list_departments,
        departments_handlers::department_handler::get_department,
        departments_handlers::department_handler::create_department,
        departments_handlers::department_handler::update_department,
        departments_handlers::department_handler::delete_department,
        // Universities
        universities_handlers::university_handler::list_universities,
        universities_handlers::university_handler::get_university,
        universities_handlers::university_handler::create_university,
        universities_handlers::university_handler::update_university,
        universities_handlers::university_handler::delete_university,
        // Report types
        report_types_handlers::report_type_handler::list_report_types,
        report_types_handlers::report_type_handler::list_active_report_types,
        report_types_handlers::report_type_handler::get_report_type,
        report_types_handlers::report_type_handler::create_report_type,
        report_types_handlers::report_type_handler::update_report_type,
        report_types_handlers::report_type_handler::delete_report_type,
        // Reports
        reports_handlers::report_handler::upload_report,
        reports_handlers::report_handler::resubmit_report,
        reports_handlers::report_handler::approve_report,
        reports_handlers::report_handler::reject_report,
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::list_my_reports,
        reports_handlers::report_handler::list_pending_reports,
        reports_handlers::report_handler::list_stagiaire_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::download_report,
        reports_handlers::report_handler::delete_report,
        // Timeline
        reports_handlers::timeline_handler::get_my_timeline,
        reports_handlers::timeline_handler::get_stagiaire_timeline,
        reports_handlers::timeline_handler::get_timeline_anchors,
        reports_handlers::timeline_handler::update_timeline_anchors,
        // Ratings
        ratings_handlers::rating_handler::create_rating,
        ratings_handlers::rating_handler::update_rating,
        ratings_handlers::rating_handler::submit_rating,
        ratings_handlers::rating_handler::approve_rating,
        ratings_handlers::rating_handler::reject_rating,
        ratings_handlers::rating_handler::respond_to_rating,
        ratings_handlers::rating_handler::delete_rating,
        ratings_handlers::rating_handler::get_rating,
        ratings_handlers::rating_handler::list_my_ratings,
        ratings_handlers::rating_handler::list_ratings_about_me,
        ratings_handlers::rating_handler::list_pending_ratings,
        ratings_handlers::rating_handler::get_rating_stats,
        // Meetings
        meetings_handlers::meeting_handler::create_meeting,
        meetings_handlers::meeting_handler::list_my_meetings,
        meetings_handlers::meeting_handler::get_meeting,
        meetings_handlers::meeting_handler::update_meeting,
        meetings_handlers::meeting_handler::update_meeting_status,
        meetings_handlers::meeting_handler::accept_meeting,
        meetings_handlers::meeting_handler::delete_meeting,
        // Notifications
        notifications_handlers::notification_handler::list_notifications,
        notifications_handlers::notification_handler::unread_count,
        notifications_handlers::notification_handler::mark_read,
        notifications_handlers::notification_handler::mark_all_read,
        notifications_handlers::notification_handler::delete_notification,
        // Job offers
        job_offers_handlers::job_offer_handler::create_job_offer,
        job_offers_handlers::job_offer_handler::list_job_offers,
        job_offers_handlers::job_offer_handler::get_job_offer,
        job_offers_handlers::job_offer_handler::update_job_offer,
        job_offers_handlers::job_offer_handler::delete_job_offer,
        // Recommendations
        job_offers_handlers::recommendation_handler::generate_recommendations,
        job_offers_handlers::recommendation_handler::list_recommendations,
        job_offers_handlers::recommendation_handler::get_offer_with_recommendations,
        job_offers_handlers::recommendation_handler::update_recommendation_status,
        job_offers_handlers::recommendation_handler::delete_recommendations,
        // Projects
        projects_handlers::project_handler::create_project,
        projects_handlers::project_handler::list_projects,
        projects_handlers::project_handler::list_my_projects,
        projects_handlers::project_handler::get_project,
        projects_handlers::project_handler::update_project,
        projects_handlers::project_handler::add_project_member,
        projects_handlers::project_handler::remove_project_member,
        projects_handlers::project_handler::delete_project,
        projects_handlers::project_handler::create_sprint,
        projects_handlers::project_handler::list_sprints,
        projects_handlers::project_handler::update_sprint,
        projects_handlers::project_handler::delete_sprint,
        projects_handlers::project_handler::create_task,
        projects_handlers::project_handler::list_tasks,
        projects_handlers::project_handler::update_task,
        projects_handlers::project_handler::delete_task,
        // Posts
        posts_handlers::post_handler::upload_attachment,
        posts_handlers::post_handler::create_post,
        posts_handlers::post_handler::feed,
        posts_handlers::post_handler::get_post,
        posts_handlers::post_handler::like_post,
        posts_handlers::post_handler::unlike_post,
        posts_handlers::post_handler::comment_post,
        posts_handlers::post_handler::list_comments,
        posts_handlers::post_handler::delete_comment,
        posts_handlers::post_handler::delete_post,
        // Dashboard
        dashboard_handlers::dashboard_handler::get_overview,
    ),
    components(schemas(
        ApiResponse<serde_json::Value>,
        Meta,
        users_models::UserRole,
        users_models::StageKind,
        users_models::StudentLevel,
        users_dtos::UserResponseDto,
        users_dtos::UpdateProfileDto,
        users_dtos::UpdateSkillsDto,
        users_dtos::AssignTuteurDto,
        users_dtos::CvUploadedDto,
        users_dtos::CvDownloadDto,
        departments_dtos::DepartmentResponseDto,
        departments_dtos::SaveDepartmentDto,
        universities_dtos::UniversityResponseDto,
        universities_dtos::SaveUniversityDto,
        report_types_dtos::ReportTypeResponseDto,
        report_types_dtos::CreateReportTypeDto,
        report_types_dtos::UpdateReportTypeDto,
        reports_dtos::ReportResponseDto,
        reports_dtos::UploadReportDto,
        reports_dtos::ResubmitReportDto,
        reports_dtos::ReviewReportDto,
        reports_dtos::ReportDownloadDto,
        reports_dtos::TimelineDto,
        reports_dtos::TimelineStepDto,
        reports_dtos::TimelineStepStatus,
        reports_dtos::StageTimelineDto,
        reports_dtos::UpdateStageTimelineDto,
        ratings_models::EvaluationKind,
        ratings_models::RatingStatus,
        ratings_dtos::RatingResponseDto,
        ratings_dtos::CreateRatingDto,
        ratings_dtos::UpdateRatingDto,
        ratings_dtos::RejectRatingDto,
        ratings_dtos::RatingResponseInputDto,
        ratings_dtos::RatingStatsDto,
        meetings_dtos::MeetingResponseDto,
        meetings_dtos::MeetingParticipantDto,
        meetings_dtos::CreateMeetingDto,
        meetings_dtos::UpdateMeetingDto,
        meetings_dtos::UpdateMeetingStatusDto,
        notifications_models::NotificationKind,
        notifications_models::NotificationStatus,
        notifications_dtos::NotificationResponseDto,
        notifications_dtos::UnreadCountDto,
        job_offers_dtos::JobOfferResponseDto,
        job_offers_dtos::CreateJobOfferDto,
        job_offers_dtos::UpdateJobOfferDto,
        job_offers_dtos::RecommendationResponseDto,
        job_offers_dtos::GenerateRecommendationsResultDto,
        job_offers_dtos::UpdateRecommendationStatusDto,
        job_offers_dtos::JobOfferWithRecommendationsDto,
        projects_dtos::ProjectResponseDto,
        projects_dtos::ProjectMemberDto,
        projects_dtos::CreateProjectDto,
        projects_dtos::UpdateProjectDto,
        projects_dtos::SprintResponseDto,
        projects_dtos::CreateSprintDto,
        projects_dtos::UpdateSprintDto,
        projects_dtos::TaskResponseDto,
        projects_dtos::CreateTaskDto,
        projects_dtos::UpdateTaskDto,
        posts_dtos::PostResponseDto,
        posts_dtos::PostAttachmentDto,
        posts_dtos::PostAttachmentInputDto,
        posts_dtos::PostCommentDto,
        posts_dtos::CreatePostDto,
        posts_dtos::CreateCommentDto,
        posts_dtos::AttachmentUploadedDto,
        dashboard_dtos::DashboardOverviewDto,
        dashboard_dtos::StaffOverviewDto,
        dashboard_dtos::TuteurOverviewDto,
        dashboard_dtos::StagiaireOverviewDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "User profiles, tutor assignment and CVs"),
        (name = "departments", description = "Department catalog"),
        (name = "universities", description = "University catalog"),
        (name = "report-types", description = "Configurable stage document catalog"),
        (name = "reports", description = "Stage document submission and review"),
        (name = "timeline", description = "Derived per-stagiaire timelines"),
        (name = "ratings", description = "Performance evaluations"),
        (name = "meetings", description = "Meeting scheduling"),
        (name = "notifications", description = "In-app notifications"),
        (name = "job-offers", description = "Job offers"),
        (name = "recommendations", description = "AI-assisted candidate recommendations"),
        (name = "projects", description = "Projects, sprints and tasks"),
        (name = "posts", description = "Publication feed"),
        (name = "dashboard", description = "Role-dependent overview counters"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer token security scheme
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides title/version/description from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
