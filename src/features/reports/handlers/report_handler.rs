use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    AddCommentDto, CommentResponseDto, CreateReportDto, ListReportsQuery, NearbyQuery,
    ReportDetailResponseDto, ReportListResponseDto, ReportResponseDto, SubscriptionStatusDto,
    UpdateReportStatusDto,
};
use crate::features::reports::services::{ReportFilter, ReportService, SubscriptionService};
use crate::shared::constants::DEFAULT_NEARBY_RADIUS_METERS;
use crate::shared::types::{ApiResponse, PaginationQuery};
use crate::shared::validation::{is_valid_latitude, is_valid_longitude};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub subscription_service: Arc<SubscriptionService>,
}

/// File a new report
///
/// The responsible department is resolved from the category at creation
/// time; reports whose category no department owns stay unassigned.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state
        .report_service
        .create(&dto.into_create(user.sub))
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// List reports visible to the caller
///
/// Department staff are scoped to their department, citizens to their own
/// reports; admins see everything. Newest first.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ListReportsQuery, PaginationQuery),
    responses(
        (status = 200, description = "Paged list of reports", body = ApiResponse<ReportListResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<ReportListResponseDto>>> {
    let filter = ReportFilter {
        status: query.status,
        category: query.category,
        priority: query.priority,
        ..Default::default()
    }
    .scoped_to(&user);

    let (reports, total) = state.report_service.list(&filter, &page).await?;

    let dto = ReportListResponseDto {
        reports: reports.into_iter().map(|r| r.into()).collect(),
        page: page.page,
        page_size: page.limit(),
        total,
        total_pages: page.total_pages(total),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Reports near a location
#[utoipa::path(
    get,
    path = "/api/reports/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Reports within the radius", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Missing or invalid coordinates"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn nearby_reports(
    _user: AuthenticatedUser,
    State(state): State<ReportState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let (longitude, latitude) = match (query.longitude, query.latitude) {
        (Some(lon), Some(lat)) => (lon, lat),
        _ => {
            return Err(AppError::Validation(
                "Longitude and latitude are required".to_string(),
            ))
        }
    };

    if !is_valid_longitude(longitude) || !is_valid_latitude(latitude) {
        return Err(AppError::Validation(
            "Coordinates are out of range".to_string(),
        ));
    }

    let radius = query.max_distance.unwrap_or(DEFAULT_NEARBY_RADIUS_METERS);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(AppError::Validation(
            "max_distance must be a positive number of meters".to_string(),
        ));
    }

    let reports = state
        .report_service
        .find_nearby(longitude, latitude, radius)
        .await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get report by ID with comments
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>> {
    let (report, comments) = state.report_service.get_report(id, &user).await?;

    let dto = ReportDetailResponseDto {
        report: report.into(),
        comments: comments.into_iter().map(CommentResponseDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Update report status (admin or responsible department staff)
#[utoipa::path(
    put,
    path = "/api/reports/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn update_report_status(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = state
        .report_service
        .update_status(id, dto.status, &user)
        .await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Append a comment to a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = AddCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<ReportDetailResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn add_comment(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<AddCommentDto>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (report, comments) = state.report_service.add_comment(id, &dto.text, &user).await?;

    let dto = ReportDetailResponseDto {
        report: report.into(),
        comments: comments.into_iter().map(CommentResponseDto::from).collect(),
    };

    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Subscribe to status updates for a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/subscribe",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Subscribed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn subscribe(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.subscription_service.subscribe(id, &user.sub).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Subscribed to report updates".to_string()),
        None,
    )))
}

/// Unsubscribe from status updates for a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/unsubscribe",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Unsubscribed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn unsubscribe(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .subscription_service
        .unsubscribe(id, &user.sub)
        .await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Unsubscribed from report updates".to_string()),
        None,
    )))
}

/// Whether the caller is subscribed to a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/subscription-status",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Subscription status", body = ApiResponse<SubscriptionStatusDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn subscription_status(
    user: AuthenticatedUser,
    State(state): State<ReportState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<SubscriptionStatusDto>>> {
    let is_subscribed = state
        .subscription_service
        .is_subscribed(id, &user.sub)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(SubscriptionStatusDto { is_subscribed }),
        None,
        None,
    )))
}
