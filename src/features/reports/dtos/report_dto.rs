use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    CreateReport, Report, ReportComment, ReportPriority, ReportStatus,
};

/// Request DTO for creating a report.
///
/// Image references come from the upload layer as already-stored paths.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[validate(
        length(min = 1, max = 100, message = "Category is required"),
        regex(
            path = "*crate::shared::validation::CATEGORY_REGEX",
            message = "Category must be a lowercase slug"
        )
    )]
    pub category: String,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub latitude: f64,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    pub priority: Option<ReportPriority>,

    #[validate(length(max = 5, message = "At most 5 images are allowed"))]
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateReportDto {
    pub fn into_create(self, reported_by: String) -> CreateReport {
        CreateReport {
            title: self.title,
            description: self.description,
            category: self.category,
            longitude: self.longitude,
            latitude: self.latitude,
            address: self.address,
            priority: self.priority.unwrap_or_default(),
            images: self.images,
            reported_by,
        }
    }
}

/// Request DTO for updating report status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,
}

/// Request DTO for appending a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddCommentDto {
    #[validate(length(min = 1, max = 2000, message = "Comment text is required"))]
    pub text: String,
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub priority: Option<ReportPriority>,
}

/// Query parameters for the proximity search.
///
/// Coordinates are optional at the type level so a missing pair maps to a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearbyQuery {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Search radius in meters (default: 5000)
    pub max_distance: Option<f64>,
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
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

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            longitude: r.longitude,
            latitude: r.latitude,
            address: r.address,
            priority: r.priority,
            status: r.status,
            images: r.images,
            reported_by: r.reported_by,
            assigned_to: r.assigned_to,
            assigned_department: r.assigned_department,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response DTO for a comment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: Uuid,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportComment> for CommentResponseDto {
    fn from(c: ReportComment) -> Self {
        Self {
            id: c.id,
            author_id: c.author_id,
            text: c.body,
            created_at: c.created_at,
        }
    }
}

/// Response DTO for a report with its comments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDetailResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub comments: Vec<CommentResponseDto>,
}

/// Paged report listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportListResponseDto {
    pub reports: Vec<ReportResponseDto>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Subscription membership for the calling user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionStatusDto {
    pub is_subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::address::en::StreetName;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use validator::Validate;

    fn valid_dto() -> CreateReportDto {
        CreateReportDto {
            title: Sentence(1..5).fake(),
            description: Sentence(3..10).fake(),
            category: "pothole".to_string(),
            longitude: 106.8456,
            latitude: -6.2088,
            address: StreetName().fake(),
            priority: None,
            images: vec![],
        }
    }

    #[test]
    fn valid_report_passes_validation() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut dto = valid_dto();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn uppercase_category_is_rejected() {
        let mut dto = valid_dto();
        dto.category = "Pothole".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut dto = valid_dto();
        dto.longitude = 181.0;
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.latitude = -90.5;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn too_many_images_are_rejected() {
        let mut dto = valid_dto();
        dto.images = (0..6).map(|i| format!("/uploads/img-{}.jpg", i)).collect();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn missing_priority_defaults_to_medium() {
        let report = valid_dto().into_create("alice".to_string());
        assert_eq!(report.priority, ReportPriority::Medium);
        assert_eq!(report.reported_by, "alice");
    }
}
