use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a department.
///
/// `categories` is the set of report categories this department is
/// responsible for; the directory resolves category -> department name
/// during report creation.
#[derive(Debug, Clone, FromRow)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub head_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new department
#[derive(Debug)]
pub struct CreateDepartment {
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub head_user_id: Option<String>,
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Default)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub head_user_id: Option<String>,
}
