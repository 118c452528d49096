use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::stats::dtos::{CountEntryDto, DailyCountDto, ReportStatsDto};

/// Aggregated report statistics for administrators and department staff.
///
/// When a department scope is given every aggregate is restricted to
/// reports assigned to that department.
pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute grouped counts and the trailing-30-day daily series
    pub async fn compute(&self, department_scope: Option<&str>) -> Result<ReportStatsDto> {
        let status_counts = self.counts_by("status", department_scope).await?;
        let category_counts = self.counts_by("category", department_scope).await?;
        let priority_counts = self.counts_by("priority", department_scope).await?;
        let daily_counts = self.daily_counts(department_scope).await?;

        Ok(ReportStatsDto {
            status_counts,
            category_counts,
            priority_counts,
            daily_counts,
        })
    }

    /// Group all in-scope reports by one column.
    ///
    /// `column` is one of a fixed set of identifiers, never user input.
    async fn counts_by(
        &self,
        column: &str,
        department_scope: Option<&str>,
    ) -> Result<Vec<CountEntryDto>> {
        let sql = format!(
            r#"
            SELECT {column}::text AS value, COUNT(*) AS count
            FROM reports
            WHERE ($1::text IS NULL OR assigned_department = $1)
            GROUP BY {column}
            ORDER BY COUNT(*) DESC, {column}::text ASC
            "#
        );

        let rows = sqlx::query_as::<_, (String, i64)>(&sql)
            .bind(department_scope)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to group reports by {}: {:?}", column, e);
                AppError::Database(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(value, count)| CountEntryDto { value, count })
            .collect())
    }

    /// Reports created within the trailing 30 days, grouped by calendar
    /// date. Sliding window measured from the moment of the query, not
    /// calendar-aligned; dates without reports are omitted.
    async fn daily_counts(&self, department_scope: Option<&str>) -> Result<Vec<DailyCountDto>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT to_char(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM reports
            WHERE ($1::text IS NULL OR assigned_department = $1)
              AND created_at >= NOW() - INTERVAL '30 days'
            GROUP BY to_char(created_at, 'YYYY-MM-DD')
            ORDER BY date ASC
            "#,
        )
        .bind(department_scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to compute daily report counts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows
            .into_iter()
            .map(|(date, count)| DailyCountDto { date, count })
            .collect())
    }
}
