use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::stats::handlers;
use crate::features::stats::services::StatsService;

/// Create routes for the stats feature
///
/// Requires authentication (applied by caller); role checks happen in the
/// handler via the authorization policy.
pub fn routes(service: Arc<StatsService>) -> Router {
    Router::new()
        .route("/api/reports/stats", get(handlers::get_report_stats))
        .with_state(service)
}
