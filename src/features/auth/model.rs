use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller role carried in the JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    DepartmentStaff,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Citizen => write!(f, "citizen"),
            UserRole::DepartmentStaff => write!(f, "department_staff"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Identity attached to every authenticated request.
///
/// `department` is only meaningful for department staff.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_department_staff(&self) -> bool {
        self.role == UserRole::DepartmentStaff
    }

    pub fn is_citizen(&self) -> bool {
        self.role == UserRole::Citizen
    }
}

/// JWT claims validated by `JwtValidator`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub exp: u64,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            role: claims.role,
            department: claims.department,
        }
    }
}
