use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a report; append-only, never edited or deleted
#[derive(Debug, Clone, FromRow)]
pub struct ReportComment {
    pub id: Uuid,
    pub report_id: Uuid,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
