use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Create routes for the notifications feature
///
/// All routes require authentication (applied by caller)
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route(
            "/api/notifications/token",
            post(handlers::register_push_token).delete(handlers::remove_push_token),
        )
        .with_state(service)
}
