use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Operations gated by the authorization policy.
///
/// Every handler funnels through `authorize` instead of branching on roles
/// inline, so the role rules live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewReport,
    UpdateReportStatus,
    ViewStats,
    ManageDepartments,
}

/// Scope of the record the caller is acting on.
///
/// `reporter` is the identity that filed the report; `assigned_department`
/// is the department responsible for it. Both are irrelevant for
/// collection-level actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceScope<'a> {
    pub reporter: Option<&'a str>,
    pub assigned_department: Option<&'a str>,
}

pub fn authorize(action: Action, user: &AuthenticatedUser, scope: ResourceScope<'_>) -> Result<()> {
    if user.is_admin() {
        return Ok(());
    }

    match action {
        Action::ViewReport => {
            if user.is_citizen() && scope.reporter != Some(user.sub.as_str()) {
                return Err(AppError::Forbidden(
                    "Not authorized to access this report".to_string(),
                ));
            }
            Ok(())
        }
        Action::UpdateReportStatus => {
            if !user.is_department_staff() {
                return Err(AppError::Forbidden(
                    "Not authorized to update report status".to_string(),
                ));
            }
            if user.department.as_deref() != scope.assigned_department {
                return Err(AppError::Forbidden(
                    "Not authorized to update this report".to_string(),
                ));
            }
            Ok(())
        }
        Action::ViewStats => {
            if !user.is_department_staff() {
                return Err(AppError::Forbidden(
                    "Not authorized to view statistics".to_string(),
                ));
            }
            Ok(())
        }
        Action::ManageDepartments => Err(AppError::Forbidden(
            "Not authorized to manage departments".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_citizen_user, create_staff_user};

    #[test]
    fn admin_passes_every_action() {
        let admin = create_admin_user();
        for action in [
            Action::ViewReport,
            Action::UpdateReportStatus,
            Action::ViewStats,
            Action::ManageDepartments,
        ] {
            assert!(authorize(action, &admin, ResourceScope::default()).is_ok());
        }
    }

    #[test]
    fn citizen_can_only_view_own_report() {
        let citizen = create_citizen_user("alice");

        let own = ResourceScope {
            reporter: Some("alice"),
            assigned_department: None,
        };
        assert!(authorize(Action::ViewReport, &citizen, own).is_ok());

        let other = ResourceScope {
            reporter: Some("bob"),
            assigned_department: None,
        };
        assert!(authorize(Action::ViewReport, &citizen, other).is_err());
    }

    #[test]
    fn citizen_cannot_update_status_or_view_stats() {
        let citizen = create_citizen_user("alice");
        assert!(authorize(
            Action::UpdateReportStatus,
            &citizen,
            ResourceScope {
                reporter: Some("alice"),
                assigned_department: None,
            }
        )
        .is_err());
        assert!(authorize(Action::ViewStats, &citizen, ResourceScope::default()).is_err());
    }

    #[test]
    fn staff_scoped_to_their_department() {
        let staff = create_staff_user("staff-1", "Roads");

        let in_scope = ResourceScope {
            reporter: None,
            assigned_department: Some("Roads"),
        };
        assert!(authorize(Action::UpdateReportStatus, &staff, in_scope).is_ok());

        let out_of_scope = ResourceScope {
            reporter: None,
            assigned_department: Some("Parks"),
        };
        assert!(authorize(Action::UpdateReportStatus, &staff, out_of_scope).is_err());

        let unassigned = ResourceScope::default();
        assert!(authorize(Action::UpdateReportStatus, &staff, unassigned).is_err());
    }

    #[test]
    fn staff_can_view_any_report_and_stats() {
        let staff = create_staff_user("staff-1", "Roads");
        let foreign = ResourceScope {
            reporter: Some("bob"),
            assigned_department: Some("Parks"),
        };
        assert!(authorize(Action::ViewReport, &staff, foreign).is_ok());
        assert!(authorize(Action::ViewStats, &staff, ResourceScope::default()).is_ok());
    }

    #[test]
    fn only_admin_manages_departments() {
        let staff = create_staff_user("staff-1", "Roads");
        assert!(authorize(Action::ManageDepartments, &staff, ResourceScope::default()).is_err());
    }
}
