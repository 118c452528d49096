#[cfg(test)]
use crate::features::auth::model::{AuthenticatedUser, UserRole};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        role: UserRole::Admin,
        department: None,
    }
}

#[cfg(test)]
pub fn create_citizen_user(sub: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        role: UserRole::Citizen,
        department: None,
    }
}

#[cfg(test)]
pub fn create_staff_user(sub: &str, department: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: sub.to_string(),
        role: UserRole::DepartmentStaff,
        department: Some(department.to_string()),
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
