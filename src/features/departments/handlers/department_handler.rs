use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::{authorize, Action, ResourceScope};
use crate::features::departments::dtos::{
    CreateDepartmentDto, DepartmentResponseDto, UpdateDepartmentDto,
};
use crate::features::departments::services::DepartmentService;
use crate::shared::types::ApiResponse;

/// Create a new department (admin only)
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = ApiResponse<DepartmentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Department name already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn create_department(
    user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
    AppJson(dto): AppJson<CreateDepartmentDto>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    authorize(Action::ManageDepartments, &user, ResourceScope::default())?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let department = service.create(&dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(department.into()),
        None,
        None,
    )))
}

/// List all departments
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "List of departments", body = ApiResponse<Vec<DepartmentResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn list_departments(
    _user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponseDto>>>> {
    let departments = service.list().await?;
    let dtos: Vec<DepartmentResponseDto> = departments.into_iter().map(|d| d.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

/// Get department by ID
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = ApiResponse<DepartmentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn get_department(
    _user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    let department = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(
        Some(department.into()),
        None,
        None,
    )))
}

/// Update a department (admin only)
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = ApiResponse<DepartmentResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn update_department(
    user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<uuid::Uuid>,
    AppJson(dto): AppJson<UpdateDepartmentDto>,
) -> Result<Json<ApiResponse<DepartmentResponseDto>>> {
    authorize(Action::ManageDepartments, &user, ResourceScope::default())?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let department = service.update(id, &dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(department.into()),
        None,
        None,
    )))
}

/// Delete a department (admin only)
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Department not found")
    ),
    security(("bearer_auth" = [])),
    tag = "departments"
)]
pub async fn delete_department(
    user: AuthenticatedUser,
    State(service): State<Arc<DepartmentService>>,
    Path(id): Path<uuid::Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    authorize(Action::ManageDepartments, &user, ResourceScope::default())?;
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Department removed".to_string()),
        None,
    )))
}

/// List the distinct report categories across all departments (public)
#[utoipa::path(
    get,
    path = "/api/departments/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<String>>)
    ),
    tag = "departments"
)]
pub async fn list_categories(
    State(service): State<Arc<DepartmentService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let categories = service.list_categories().await?;
    Ok(Json(ApiResponse::success(Some(categories), None, None)))
}
