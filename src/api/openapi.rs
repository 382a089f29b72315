//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, calendar, categories, equipment, health, mobile, notifications, reports, requests,
    teams, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Equipment Maintenance Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::bootstrap,
        auth::me,
        // Mobile bridge
        mobile::login,
        mobile::verify,
        // Users
        users::list_users,
        users::assign_role,
        users::assign_team,
        users::list_technicians,
        users::list_promotable,
        // Teams
        teams::list_teams,
        teams::create_team,
        teams::update_team,
        teams::add_member,
        teams::remove_member,
        teams::get_members,
        // Categories
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        // Requests
        requests::list_my_requests,
        requests::list_all_requests,
        requests::get_request,
        requests::create_request,
        requests::update_status,
        requests::assign_technician,
        requests::update_request,
        requests::scrap_equipment,
        // Calendar
        calendar::scheduled_maintenance,
        // Notifications
        notifications::list_my_notifications,
        notifications::unread_count,
        notifications::mark_as_read,
        notifications::mark_all_as_read,
        // Reports
        reports::get_overview,
        reports::get_team_performance,
        reports::get_technician_workload,
        reports::get_equipment_insights,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::UserRef,
            crate::models::user::Role,
            crate::models::user::BootstrapUser,
            crate::models::user::AssignRole,
            crate::models::user::AssignTeam,
            // Mobile bridge
            mobile::MobileLoginRequest,
            mobile::MobileLoginResponse,
            mobile::MobileVerifyResponse,
            mobile::MobileUser,
            // Teams
            crate::models::team::Team,
            crate::models::team::TeamWithCount,
            crate::models::team::TeamRef,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            crate::models::team::AddMember,
            // Categories
            crate::models::category::EquipmentCategory,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentRef,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Requests
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestDetails,
            crate::models::request::RequestType,
            crate::models::request::RequestPriority,
            crate::models::request::RequestStatus,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequestStatus,
            crate::models::request::AssignTechnician,
            crate::models::request::UpdateRequest,
            // Notifications
            crate::models::notification::Notification,
            crate::models::notification::UnreadCount,
            // Reports
            reports::ReportRange,
            reports::RequestsOverview,
            reports::TeamPerformance,
            reports::TechnicianWorkload,
            reports::EquipmentStat,
            reports::EquipmentInsights,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "mobile", description = "Mobile bridge endpoints"),
        (name = "users", description = "User management"),
        (name = "teams", description = "Team management"),
        (name = "categories", description = "Equipment categories"),
        (name = "equipment", description = "Equipment management"),
        (name = "requests", description = "Maintenance requests"),
        (name = "calendar", description = "Scheduled maintenance calendar"),
        (name = "notifications", description = "User notifications"),
        (name = "reports", description = "Manager reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
