//! GearGuard Server - Equipment Maintenance Tracking
//!
//! A Rust REST API server for role-based maintenance request tracking.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearguard_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gearguard_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GearGuard Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/bootstrap", post(api::auth::bootstrap))
        .route("/auth/me", get(api::auth::me))
        // Mobile bridge
        .route("/mobile/auth/login", post(api::mobile::login))
        .route("/mobile/auth/verify", get(api::mobile::verify))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users/technicians", get(api::users::list_technicians))
        .route("/users/promotable", get(api::users::list_promotable))
        .route("/users/:id/role", put(api::users::assign_role))
        .route("/users/:id/team", put(api::users::assign_team))
        // Teams
        .route("/teams", get(api::teams::list_teams))
        .route("/teams", post(api::teams::create_team))
        .route("/teams/:id", put(api::teams::update_team))
        .route("/teams/:id/members", get(api::teams::get_members))
        .route("/teams/:id/members", post(api::teams::add_member))
        .route("/teams/members/:user_id", delete(api::teams::remove_member))
        // Categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        .route("/categories/:id", put(api::categories::update_category))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        // Maintenance requests
        .route("/requests", get(api::requests::list_all_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/mine", get(api::requests::list_my_requests))
        .route("/requests/:id", get(api::requests::get_request))
        .route("/requests/:id", put(api::requests::update_request))
        .route("/requests/:id/status", put(api::requests::update_status))
        .route("/requests/:id/assignee", put(api::requests::assign_technician))
        .route("/requests/:id/scrap", post(api::requests::scrap_equipment))
        // Calendar
        .route("/calendar", get(api::calendar::scheduled_maintenance))
        // Notifications
        .route("/notifications", get(api::notifications::list_my_notifications))
        .route("/notifications/unread", get(api::notifications::unread_count))
        .route("/notifications/:id/read", post(api::notifications::mark_as_read))
        .route("/notifications/read-all", post(api::notifications::mark_all_as_read))
        // Reports
        .route("/reports/overview", get(api::reports::get_overview))
        .route("/reports/teams", get(api::reports::get_team_performance))
        .route("/reports/technicians", get(api::reports::get_technician_workload))
        .route("/reports/equipment", get(api::reports::get_equipment_insights))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
