use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::model::{AuthenticatedUser, UserRole};
use crate::features::departments::{dtos as departments_dtos, handlers as departments_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::stats::{dtos as stats_dtos, handlers as stats_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Departments
        departments_handlers::create_department,
        departments_handlers::list_departments,
        departments_handlers::get_department,
        departments_handlers::update_department,
        departments_handlers::delete_department,
        departments_handlers::list_categories,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::nearby_reports,
        reports_handlers::get_report,
        reports_handlers::update_report_status,
        reports_handlers::add_comment,
        reports_handlers::subscribe,
        reports_handlers::unsubscribe,
        reports_handlers::subscription_status,
        // Stats
        stats_handlers::get_report_stats,
        // Notifications
        notifications_handlers::register_push_token,
        notifications_handlers::remove_push_token,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            AuthenticatedUser,
            UserRole,
            // Departments
            departments_dtos::CreateDepartmentDto,
            departments_dtos::UpdateDepartmentDto,
            departments_dtos::DepartmentResponseDto,
            ApiResponse<departments_dtos::DepartmentResponseDto>,
            ApiResponse<Vec<departments_dtos::DepartmentResponseDto>>,
            ApiResponse<Vec<String>>,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportPriority,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::AddCommentDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::CommentResponseDto,
            reports_dtos::ReportDetailResponseDto,
            reports_dtos::ReportListResponseDto,
            reports_dtos::SubscriptionStatusDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportDetailResponseDto>,
            ApiResponse<reports_dtos::ReportListResponseDto>,
            ApiResponse<reports_dtos::SubscriptionStatusDto>,
            // Stats
            stats_dtos::CountEntryDto,
            stats_dtos::DailyCountDto,
            stats_dtos::ReportStatsDto,
            ApiResponse<stats_dtos::ReportStatsDto>,
            // Notifications
            notifications_dtos::RegisterPushTokenDto,
        )
    ),
    tags(
        (name = "departments", description = "Department directory and category ownership"),
        (name = "reports", description = "Citizen reports: lifecycle, comments, subscriptions"),
        (name = "stats", description = "Aggregated report statistics"),
        (name = "notifications", description = "Push delivery token registration"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicWatch API",
        version = "0.1.0",
        description = "API documentation for CivicWatch",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

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

/// Modifier to override OpenAPI info from config
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
