use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{ReportService, SubscriptionService};

/// Create routes for the reports feature
///
/// All routes require authentication (applied by caller)
pub fn routes(
    report_service: Arc<ReportService>,
    subscription_service: Arc<SubscriptionService>,
) -> Router {
    let state = ReportState {
        report_service,
        subscription_service,
    };

    Router::new()
        .route(
            "/api/reports",
            post(handlers::create_report).get(handlers::list_reports),
        )
        .route("/api/reports/nearby", get(handlers::nearby_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/reports/{id}/status",
            put(handlers::update_report_status),
        )
        .route("/api/reports/{id}/comments", post(handlers::add_comment))
        .route("/api/reports/{id}/subscribe", post(handlers::subscribe))
        .route("/api/reports/{id}/unsubscribe", post(handlers::unsubscribe))
        .route(
            "/api/reports/{id}/subscription-status",
            get(handlers::subscription_status),
        )
        .with_state(state)
}
