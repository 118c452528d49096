use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Per-report subscriber registry.
///
/// Membership changes are single statements against the subscriber table,
/// so concurrent subscribe/unsubscribe calls on the same report cannot
/// lose each other's updates.
pub struct SubscriptionService {
    pool: PgPool,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_report_exists(&self, report_id: Uuid) -> Result<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)",
        )
        .bind(report_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check report existence: {:?}", e);
            AppError::Database(e)
        })?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Report {} not found",
                report_id
            )));
        }

        Ok(())
    }

    /// Subscribe an identity to a report; idempotent
    pub async fn subscribe(&self, report_id: Uuid, user_id: &str) -> Result<()> {
        self.ensure_report_exists(report_id).await?;

        sqlx::query(
            r#"
            INSERT INTO report_subscribers (report_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (report_id, user_id) DO NOTHING
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to subscribe to report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!("User {} subscribed to report {}", user_id, report_id);

        Ok(())
    }

    /// Remove an identity from a report's subscribers; idempotent
    pub async fn unsubscribe(&self, report_id: Uuid, user_id: &str) -> Result<()> {
        self.ensure_report_exists(report_id).await?;

        sqlx::query(
            r#"
            DELETE FROM report_subscribers
            WHERE report_id = $1 AND user_id = $2
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to unsubscribe from report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!("User {} unsubscribed from report {}", user_id, report_id);

        Ok(())
    }

    /// Whether the identity is subscribed to the report
    pub async fn is_subscribed(&self, report_id: Uuid, user_id: &str) -> Result<bool> {
        self.ensure_report_exists(report_id).await?;

        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM report_subscribers
                WHERE report_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(report_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check subscription: {:?}", e);
            AppError::Database(e)
        })
    }
}
