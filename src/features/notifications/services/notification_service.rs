use std::sync::Arc;

use futures::stream::{self, StreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::services::{PushClient, PushJob};

/// Max in-flight sends towards the push provider
const PUSH_SEND_CONCURRENCY: usize = 8;

/// Resolves a report's subscribers to delivery tokens and hands one job
/// per token to the push client. No retries and no delivery tracking;
/// failed sends are logged and dropped.
pub struct NotificationService {
    pool: PgPool,
    push_client: Arc<dyn PushClient>,
}

impl NotificationService {
    pub fn new(pool: PgPool, push_client: Arc<dyn PushClient>) -> Self {
        Self { pool, push_client }
    }

    /// One job per registered token; subscribers without a token are
    /// filtered out, not an error.
    fn build_jobs(tokens: Vec<Option<String>>, title: &str, body: &str) -> Vec<PushJob> {
        tokens
            .into_iter()
            .flatten()
            .map(|token| PushJob {
                token,
                title: title.to_string(),
                body: body.to_string(),
            })
            .collect()
    }

    /// Fan a notification out to every subscriber of the report that has
    /// a registered token. Returns the number of jobs delivered to the
    /// provider.
    pub async fn dispatch(&self, report_id: Uuid, title: &str, body: &str) -> Result<usize> {
        let tokens = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT pt.token
            FROM report_subscribers rs
            LEFT JOIN push_tokens pt ON pt.user_id = rs.user_id
            WHERE rs.report_id = $1
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve subscriber tokens: {:?}", e);
            AppError::Database(e)
        })?;

        let jobs = Self::build_jobs(tokens, title, body);
        if jobs.is_empty() {
            tracing::debug!("No subscriber tokens for report {}", report_id);
            return Ok(0);
        }

        let client = Arc::clone(&self.push_client);
        let sent = stream::iter(jobs)
            .map(|job| {
                let client = Arc::clone(&client);
                async move {
                    match client.send(&job).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!("Push send failed: {}", e);
                            false
                        }
                    }
                }
            })
            .buffer_unordered(PUSH_SEND_CONCURRENCY)
            .filter(|ok| futures::future::ready(*ok))
            .count()
            .await;

        tracing::info!("Dispatched {} notification(s) for report {}", sent, report_id);

        Ok(sent)
    }

    /// Register (or replace) the caller's delivery token
    pub async fn register_token(&self, user_id: &str, token: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_tokens (user_id, token)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET token = $2, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to register push token: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::debug!("Registered push token for user {}", user_id);

        Ok(())
    }

    /// Remove the caller's delivery token; no error if none registered
    pub async fn remove_token(&self, user_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM push_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to remove push token: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_jobs_skips_tokenless_subscribers() {
        let tokens = vec![
            Some("token-a".to_string()),
            None,
            Some("token-b".to_string()),
            None,
        ];

        let jobs = NotificationService::build_jobs(tokens, "title", "body");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].token, "token-a");
        assert_eq!(jobs[1].token, "token-b");
        assert!(jobs.iter().all(|j| j.title == "title" && j.body == "body"));
    }

    #[test]
    fn build_jobs_with_no_subscribers_is_empty() {
        let jobs = NotificationService::build_jobs(vec![], "title", "body");
        assert!(jobs.is_empty());
    }
}
