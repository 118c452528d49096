use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::departments::models::{CreateDepartment, Department, UpdateDepartment};

/// Request DTO for creating a department
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, max = 200, message = "Department name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Department description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "At least one category is required"))]
    pub categories: Vec<String>,

    pub head_user_id: Option<String>,
}

impl From<CreateDepartmentDto> for CreateDepartment {
    fn from(dto: CreateDepartmentDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            categories: dto.categories,
            head_user_id: dto.head_user_id,
        }
    }
}

/// Request DTO for updating a department; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub categories: Option<Vec<String>>,

    pub head_user_id: Option<String>,
}

impl From<UpdateDepartmentDto> for UpdateDepartment {
    fn from(dto: UpdateDepartmentDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            categories: dto.categories,
            head_user_id: dto.head_user_id,
        }
    }
}

/// Response DTO for a department
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub head_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentResponseDto {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            categories: d.categories,
            head_user_id: d.head_user_id,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
