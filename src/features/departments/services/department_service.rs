use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::departments::models::{CreateDepartment, Department, UpdateDepartment};

/// Directory of departments and the categories they own.
///
/// Passed explicitly into the report service for auto-assignment; there is
/// no process-wide category mapping.
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new department; the name must be unique
    pub async fn create(&self, data: &CreateDepartment) -> Result<Department> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, description, categories, head_user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, categories, head_user_id, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.categories)
        .bind(&data.head_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Department '{}' already exists", data.name))
            }
            _ => {
                tracing::error!("Failed to create department: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Created department: {} ({})", department.name, department.id);

        Ok(department)
    }

    /// List all departments, ordered by name
    pub async fn list(&self) -> Result<Vec<Department>> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, categories, head_user_id, created_at, updated_at
            FROM departments
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list departments: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Get department by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, categories, head_user_id, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get department: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Partially update a department
    pub async fn update(&self, id: Uuid, data: &UpdateDepartment) -> Result<Department> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                categories = COALESCE($4, categories),
                head_user_id = COALESCE($5, head_user_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, categories, head_user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.categories)
        .bind(&data.head_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Department name already in use".to_string())
            }
            _ => {
                tracing::error!("Failed to update department: {:?}", e);
                AppError::Database(e)
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    /// Delete a department
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete department: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Department {} not found", id)));
        }

        tracing::info!("Deleted department: {}", id);

        Ok(())
    }

    /// List the distinct categories owned by any department
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT unnest(categories) AS category
            FROM departments
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Resolve the department responsible for a category.
    ///
    /// When several departments list the same category the first one by
    /// name wins, so the result is stable across directory scans.
    pub async fn find_for_category(&self, category: &str) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM departments
            WHERE $1 = ANY(categories)
            ORDER BY name
            LIMIT 1
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve department for category: {:?}", e);
            AppError::Database(e)
        })
    }
}
