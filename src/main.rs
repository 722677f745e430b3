mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::JwtValidator;
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::departments::{routes as departments_routes, DepartmentService};
use crate::features::job_offers::{
    routes as job_offers_routes, HttpRecommendationEngine, JobOfferService, RecommendationService,
};
use crate::features::meetings::{routes as meetings_routes, MeetingService};
use crate::features::notifications::{routes as notifications_routes, NotificationService};
use crate::features::posts::{routes as posts_routes, PostService};
use crate::features::projects::{routes as projects_routes, ProjectService};
use crate::features::ratings::{routes as ratings_routes, RatingService};
use crate::features::report_types::{routes as report_types_routes, ReportTypeService};
use crate::features::reports::{routes as reports_routes, ReportService, TimelineService};
use crate::features::universities::{routes as universities_routes, UniversityService};
use crate::features::users::{routes as users_routes, UserService};
use crate::modules::storage::ObjectStore;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Initialize auth (bearer token validation only; issuance is external)
    let jwt_validator = Arc::new(JwtValidator::new(&config.auth));
    tracing::info!("Auth configuration initialized");

    // Initialize object storage for report files, CVs and attachments
    let object_store = Arc::new(
        ObjectStore::new(config.storage.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage client: {}", e))?,
    );
    tracing::info!(
        "Storage client initialized for bucket: {}",
        object_store.bucket_name()
    );

    // Initialize Notification Service (used by several workflows)
    let notification_service = Arc::new(NotificationService::new(pool.clone()));
    tracing::info!("Notification service initialized");

    // Initialize User Service
    let user_service = Arc::new(UserService::new(pool.clone(), Arc::clone(&object_store)));
    tracing::info!("User service initialized");

    // Initialize catalog services
    let department_service = Arc::new(DepartmentService::new(pool.clone()));
    let university_service = Arc::new(UniversityService::new(pool.clone()));
    let report_type_service = Arc::new(ReportTypeService::new(pool.clone()));
    tracing::info!("Catalog services initialized");

    // Initialize the report workflow services
    let timeline_service = Arc::new(TimelineService::new(pool.clone()));
    let report_service = Arc::new(ReportService::new(
        pool.clone(),
        Arc::clone(&object_store),
        Arc::clone(&timeline_service),
        Arc::clone(&notification_service),
    ));
    tracing::info!("Report services initialized");

    // Initialize Rating Service
    let rating_service = Arc::new(RatingService::new(
        pool.clone(),
        Arc::clone(&notification_service),
    ));
    tracing::info!("Rating service initialized");

    // Initialize Meeting Service
    let meeting_service = Arc::new(MeetingService::new(
        pool.clone(),
        Arc::clone(&notification_service),
    ));
    tracing::info!("Meeting service initialized");

    // Initialize Job Offer services (external matching engine over HTTP)
    let recommendation_engine = Arc::new(HttpRecommendationEngine::new(&config.recommendation));
    let job_offer_service = Arc::new(JobOfferService::new(pool.clone()));
    let recommendation_service = Arc::new(RecommendationService::new(
        pool.clone(),
        recommendation_engine,
        config.recommendation.default_top_n,
    ));
    tracing::info!(
        "Job offer services initialized (engine: {})",
        config.recommendation.base_url
    );

    // Initialize Project Service
    let project_service = Arc::new(ProjectService::new(pool.clone()));
    tracing::info!("Project service initialized");

    // Initialize Post Service
    let post_service = Arc::new(PostService::new(pool.clone(), Arc::clone(&object_store)));
    tracing::info!("Post service initialized");

    // Initialize Dashboard Service
    let dashboard_service = Arc::new(DashboardService::new(pool.clone()));
    tracing::info!("Dashboard service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require JWT authentication)
    let protected_routes = Router::new()
        .merge(users_routes::routes(user_service))
        .merge(departments_routes::routes(department_service))
        .merge(universities_routes::routes(university_service))
        .merge(report_types_routes::routes(report_type_service))
        .merge(reports_routes::routes(Arc::clone(&report_service)))
        .merge(reports_routes::timeline_routes(Arc::clone(
            &timeline_service,
        )))
        .merge(ratings_routes::routes(Arc::clone(&rating_service)))
        .merge(meetings_routes::routes(Arc::clone(&meeting_service)))
        .merge(notifications_routes::routes(Arc::clone(
            &notification_service,
        )))
        .merge(job_offers_routes::routes(
            Arc::clone(&job_offer_service),
            Arc::clone(&recommendation_service),
        ))
        .merge(projects_routes::routes(Arc::clone(&project_service)))
        .merge(posts_routes::routes(Arc::clone(&post_service)))
        .merge(dashboard_routes::routes(Arc::clone(&dashboard_service)))
        .route_layer(axum::middleware::from_fn_with_state(
            jwt_validator.clone(),
            middleware::auth_middleware,
        ));

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}
