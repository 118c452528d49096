use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One grouped count, keyed by the raw field value.
///
/// Rendering of absent values (e.g. an "unknown" bucket) is left to the
/// consumer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountEntryDto {
    pub value: String,
    pub count: i64,
}

/// Reports created on one calendar date (YYYY-MM-DD)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyCountDto {
    pub date: String,
    pub count: i64,
}

/// Aggregated report statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportStatsDto {
    pub status_counts: Vec<CountEntryDto>,
    pub category_counts: Vec<CountEntryDto>,
    pub priority_counts: Vec<CountEntryDto>,
    /// Trailing 30 days, ascending by date; dates with no reports are
    /// omitted rather than zero-filled
    pub daily_counts: Vec<DailyCountDto>,
}
