use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::departments::handlers;
use crate::features::departments::services::DepartmentService;

/// Public routes for the departments feature (no authentication)
pub fn public_routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route(
            "/api/departments/categories",
            get(handlers::list_categories),
        )
        .with_state(service)
}

/// Protected routes (require auth middleware to be applied by caller)
pub fn protected_routes(service: Arc<DepartmentService>) -> Router {
    Router::new()
        .route(
            "/api/departments",
            post(handlers::create_department).get(handlers::list_departments),
        )
        .route(
            "/api/departments/{id}",
            get(handlers::get_department)
                .put(handlers::update_department)
                .delete(handlers::delete_department),
        )
        .with_state(service)
}
