use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::{authorize, Action, ResourceScope};
use crate::features::departments::DepartmentService;
use crate::features::notifications::NotificationService;
use crate::features::reports::models::{
    CreateReport, Report, ReportComment, ReportPriority, ReportStatus,
};
use crate::shared::types::PaginationQuery;

/// Earth's radius in meters (for Haversine formula)
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Filter for listing reports; scope fields are derived from the caller
/// role, the rest come from explicit query parameters.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub category: Option<String>,
    pub priority: Option<ReportPriority>,
    pub department: Option<String>,
    pub reporter: Option<String>,
}

impl ReportFilter {
    /// Apply the caller's role scope on top of explicit filters.
    ///
    /// Department staff only see reports assigned to their department,
    /// citizens only their own; admins see everything.
    pub fn scoped_to(mut self, user: &AuthenticatedUser) -> Self {
        if user.is_department_staff() {
            self.department = user.department.clone();
        } else if user.is_citizen() {
            self.reporter = Some(user.sub.clone());
        }
        self
    }
}

/// Owns the report lifecycle: creation with department auto-assignment,
/// status transitions, comments and the proximity query.
pub struct ReportService {
    pool: PgPool,
    departments: Arc<DepartmentService>,
    notifier: Arc<NotificationService>,
}

impl ReportService {
    pub fn new(
        pool: PgPool,
        departments: Arc<DepartmentService>,
        notifier: Arc<NotificationService>,
    ) -> Self {
        Self {
            pool,
            departments,
            notifier,
        }
    }

    /// Calculate Haversine distance between two points in meters
    pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lon = (lon2 - lon1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_METERS * c
    }

    /// Bounding box around a point, used as a prefilter before the exact
    /// distance check. 1 degree of latitude is approximately 111km; the
    /// longitude span widens with latitude.
    fn bounding_box(lat: f64, lon: f64, radius_meters: f64) -> (f64, f64, f64, f64) {
        let lat_delta = (radius_meters / 111_000.0) * 2.0;
        let lon_delta = lat_delta / lat.to_radians().cos().abs().max(0.01);
        (
            lat - lat_delta,
            lat + lat_delta,
            lon - lon_delta,
            lon + lon_delta,
        )
    }

    /// Create a new report.
    ///
    /// The department directory resolves the responsible department from
    /// the category before the single insert; no department match leaves
    /// the report unassigned.
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let assigned_department = self.departments.find_for_category(&data.category).await?;

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                title, description, category, longitude, latitude, address,
                priority, images, reported_by, assigned_department
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, title, description, category, longitude, latitude, address,
                priority, status, images, reported_by, assigned_to,
                assigned_department, created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.longitude)
        .bind(data.latitude)
        .bind(&data.address)
        .bind(data.priority)
        .bind(&data.images)
        .bind(&data.reported_by)
        .bind(&assigned_department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report {} (category: {}, department: {:?})",
            report.id,
            report.category,
            report.assigned_department
        );

        Ok(report)
    }

    /// Get report by ID without any access check (internal)
    pub async fn get_by_id(&self, id: Uuid) -> Result<Report> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, title, description, category, longitude, latitude, address,
                priority, status, images, reported_by, assigned_to,
                assigned_department, created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Get a report for the given caller, with its comments.
    ///
    /// Citizens may only read reports they filed themselves.
    pub async fn get_report(
        &self,
        id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<(Report, Vec<ReportComment>)> {
        let report = self.get_by_id(id).await?;

        authorize(
            Action::ViewReport,
            user,
            ResourceScope {
                reporter: Some(report.reported_by.as_str()),
                assigned_department: report.assigned_department.as_deref(),
            },
        )?;

        let comments = self.get_comments(id).await?;
        Ok((report, comments))
    }

    /// List reports matching the filter, newest first.
    /// Returns (reports, total_count).
    pub async fn list(
        &self,
        filter: &ReportFilter,
        page: &PaginationQuery,
    ) -> Result<(Vec<Report>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::report_priority IS NULL OR priority = $3)
              AND ($4::text IS NULL OR assigned_department = $4)
              AND ($5::text IS NULL OR reported_by = $5)
            "#,
        )
        .bind(filter.status)
        .bind(&filter.category)
        .bind(filter.priority)
        .bind(&filter.department)
        .bind(&filter.reporter)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        let reports = sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, title, description, category, longitude, latitude, address,
                priority, status, images, reported_by, assigned_to,
                assigned_department, created_at, updated_at
            FROM reports
            WHERE ($1::report_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::report_priority IS NULL OR priority = $3)
              AND ($4::text IS NULL OR assigned_department = $4)
              AND ($5::text IS NULL OR reported_by = $5)
            ORDER BY created_at DESC
            OFFSET $6 LIMIT $7
            "#,
        )
        .bind(filter.status)
        .bind(&filter.category)
        .bind(filter.priority)
        .bind(&filter.department)
        .bind(&filter.reporter)
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((reports, total))
    }

    /// Update report status.
    ///
    /// The status write and the one-time assignment on the first
    /// in_progress transition happen in a single statement, so a
    /// concurrent writer cannot reassign the report. Subscriber
    /// notification runs detached after the persist; its failure never
    /// fails the update.
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: ReportStatus,
        user: &AuthenticatedUser,
    ) -> Result<Report> {
        let current = self.get_by_id(id).await?;

        authorize(
            Action::UpdateReportStatus,
            user,
            ResourceScope {
                reporter: None,
                assigned_department: current.assigned_department.as_deref(),
            },
        )?;

        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports
            SET
                status = $2,
                assigned_to = COALESCE(
                    assigned_to,
                    CASE WHEN $2 = 'in_progress'::report_status THEN $3 END
                ),
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, title, description, category, longitude, latitude, address,
                priority, status, images, reported_by, assigned_to,
                assigned_department, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new_status)
        .bind(&user.sub)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update report status: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        tracing::info!(
            "Report {} status set to {} by {}",
            report.id,
            report.status,
            user.sub
        );

        // Notify subscribers without blocking the caller's response
        let notifier = Arc::clone(&self.notifier);
        let report_id = report.id;
        let body = format!(
            "Your subscribed report \"{}\" is now {}.",
            report.title,
            report.status.human_label()
        );
        tokio::spawn(async move {
            if let Err(e) = notifier
                .dispatch(report_id, "Report status updated", &body)
                .await
            {
                tracing::warn!(
                    "Failed to dispatch notifications for report {}: {}",
                    report_id,
                    e
                );
            }
        });

        Ok(report)
    }

    /// Append a comment and return the report with its comments
    pub async fn add_comment(
        &self,
        id: Uuid,
        body: &str,
        author: &AuthenticatedUser,
    ) -> Result<(Report, Vec<ReportComment>)> {
        let report = self.get_by_id(id).await?;

        sqlx::query(
            r#"
            INSERT INTO report_comments (report_id, author_id, body)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(&author.sub)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add comment: {:?}", e);
            AppError::Database(e)
        })?;

        let comments = self.get_comments(id).await?;
        Ok((report, comments))
    }

    /// Comments for a report in insertion order
    pub async fn get_comments(&self, report_id: Uuid) -> Result<Vec<ReportComment>> {
        sqlx::query_as::<_, ReportComment>(
            r#"
            SELECT id, report_id, author_id, body, created_at
            FROM report_comments
            WHERE report_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report comments: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Reports within `radius_meters` great-circle distance of the point,
    /// newest first. A bounding box narrows the scan before the exact
    /// Haversine check.
    pub async fn find_nearby(
        &self,
        longitude: f64,
        latitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<Report>> {
        let (lat_min, lat_max, lon_min, lon_max) =
            Self::bounding_box(latitude, longitude, radius_meters);

        let candidates = sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, title, description, category, longitude, latitude, address,
                priority, status, images, reported_by, assigned_to,
                assigned_department, created_at, updated_at
            FROM reports
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
            ORDER BY created_at DESC
            "#,
        )
        .bind(lat_min)
        .bind(lat_max)
        .bind(lon_min)
        .bind(lon_max)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find nearby reports: {:?}", e);
            AppError::Database(e)
        })?;

        let nearby = candidates
            .into_iter()
            .filter(|r| {
                Self::haversine_distance(latitude, longitude, r.latitude, r.longitude)
                    <= radius_meters
            })
            .collect();

        Ok(nearby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_citizen_user, create_staff_user};

    #[test]
    fn test_haversine_distance() {
        // London to Paris, approx 344km great-circle
        let london = (51.5074, -0.1278);
        let paris = (48.8566, 2.3522);

        let distance = ReportService::haversine_distance(london.0, london.1, paris.0, paris.1);

        assert!(distance > 330_000.0 && distance < 355_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let distance = ReportService::haversine_distance(51.5074, -0.1278, 51.5074, -0.1278);

        assert!(distance < 1.0); // Less than 1 meter
    }

    #[test]
    fn test_haversine_separates_near_and_far() {
        // ~900m apart vs ~2.2km apart from the same origin
        let origin = (51.5074, -0.1278);
        let near = ReportService::haversine_distance(origin.0, origin.1, 51.5074, -0.1148);
        let far = ReportService::haversine_distance(origin.0, origin.1, 51.5274, -0.1278);

        assert!(near < 1_000.0);
        assert!(far > 1_000.0);
    }

    #[test]
    fn bounding_box_contains_radius() {
        let (lat, lon) = (51.5074, -0.1278);
        let radius = 5_000.0;
        let (lat_min, lat_max, lon_min, lon_max) = ReportService::bounding_box(lat, lon, radius);

        // A point right at the radius due north/east must fall inside the box
        let north = lat + radius / 111_000.0;
        let east = lon + radius / (111_000.0 * lat.to_radians().cos());
        assert!(north > lat_min && north < lat_max);
        assert!(east > lon_min && east < lon_max);
    }

    #[test]
    fn staff_filter_is_forced_to_their_department() {
        let staff = create_staff_user("staff-1", "Roads");
        let filter = ReportFilter {
            department: Some("Parks".to_string()),
            ..Default::default()
        }
        .scoped_to(&staff);

        assert_eq!(filter.department.as_deref(), Some("Roads"));
        assert!(filter.reporter.is_none());
    }

    #[test]
    fn citizen_filter_is_forced_to_own_reports() {
        let citizen = create_citizen_user("alice");
        let filter = ReportFilter::default().scoped_to(&citizen);

        assert_eq!(filter.reporter.as_deref(), Some("alice"));
        assert!(filter.department.is_none());
    }

    #[test]
    fn admin_filter_is_unscoped() {
        let admin = create_admin_user();
        let filter = ReportFilter {
            status: Some(ReportStatus::Pending),
            ..Default::default()
        }
        .scoped_to(&admin);

        assert!(filter.department.is_none());
        assert!(filter.reporter.is_none());
        assert_eq!(filter.status, Some(ReportStatus::Pending));
    }
}
