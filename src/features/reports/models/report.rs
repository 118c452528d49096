use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl ReportStatus {
    /// Human-readable label for notifications (underscores become spaces)
    pub fn human_label(&self) -> String {
        self.to_string().replace('_', " ")
    }
}

/// Report priority enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Low,
    Medium,
    High,
}

impl Default for ReportPriority {
    fn default() -> Self {
        ReportPriority::Medium
    }
}

impl std::fmt::Display for ReportPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportPriority::Low => write!(f, "low"),
            ReportPriority::Medium => write!(f, "medium"),
            ReportPriority::High => write!(f, "high"),
        }
    }
}

/// Database model for a report.
///
/// `assigned_department` is fixed at creation by the department directory;
/// `assigned_to` is set once, on the first transition to in_progress, and
/// never cleared by later status changes.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub priority: ReportPriority,
    pub status: ReportStatus,
    pub images: Vec<String>,
    pub reported_by: String,
    pub assigned_to: Option<String>,
    pub assigned_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub category: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub priority: ReportPriority,
    pub images: Vec<String>,
    pub reported_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_label_replaces_underscores() {
        assert_eq!(ReportStatus::InProgress.human_label(), "in progress");
        assert_eq!(ReportStatus::Pending.human_label(), "pending");
        assert_eq!(ReportStatus::Resolved.human_label(), "resolved");
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(ReportPriority::default(), ReportPriority::Medium);
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&ReportStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
