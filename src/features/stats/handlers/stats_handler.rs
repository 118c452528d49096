use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::{authorize, Action, ResourceScope};
use crate::features::stats::dtos::ReportStatsDto;
use crate::features::stats::services::StatsService;
use crate::shared::types::ApiResponse;

/// Report statistics (admin or department staff)
///
/// Department staff get aggregates restricted to their own department.
#[utoipa::path(
    get,
    path = "/api/reports/stats",
    responses(
        (status = 200, description = "Aggregated statistics", body = ApiResponse<ReportStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "stats"
)]
pub async fn get_report_stats(
    user: AuthenticatedUser,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<ReportStatsDto>>> {
    authorize(Action::ViewStats, &user, ResourceScope::default())?;

    let department_scope = if user.is_department_staff() {
        user.department.as_deref()
    } else {
        None
    };

    let stats = service.compute(department_scope).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
