use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::RegisterPushTokenDto;
use crate::features::notifications::services::NotificationService;
use crate::shared::types::ApiResponse;

/// Register the caller's push delivery token
#[utoipa::path(
    post,
    path = "/api/notifications/token",
    request_body = RegisterPushTokenDto,
    responses(
        (status = 200, description = "Token registered"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn register_push_token(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
    AppJson(dto): AppJson<RegisterPushTokenDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.register_token(&user.sub, &dto.token).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Push token registered".to_string()),
        None,
    )))
}

/// Remove the caller's push delivery token
#[utoipa::path(
    delete,
    path = "/api/notifications/token",
    responses(
        (status = 200, description = "Token removed"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "notifications"
)]
pub async fn remove_push_token(
    user: AuthenticatedUser,
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove_token(&user.sub).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Push token removed".to_string()),
        None,
    )))
}
