//! Per-role dashboard statistics.
//!
//! Counts are recomputed from the full store on every call. Figures the
//! service has no records for are fixed values shown on the dashboards.

use crate::state::GovernanceState;
use access_gov_core::model::{ApplicationCategory, RequestKind, RequestStatus, RoleCategory};
use serde::Serialize;

const MANAGER_TOTAL_USERS: usize = 124;
const MANAGER_MODIFIED_REQUESTS: usize = 12;
const APP_OWNER_COMPLETED_APPROVALS: usize = 145;
const APP_OWNER_REPORTING_MANAGERS: usize = 8;
const BUSINESS_OWNER_APP_OWNERS: usize = 12;
const ADMIN_BUSINESS_OWNERS: usize = 34;
const ADMIN_APPLICATION_OWNERS: usize = 89;
const ADMIN_REPORTING_MANAGERS: usize = 245;

/// Reporting manager dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    /// Users reporting to the manager
    pub total_users: usize,
    /// Review items of this dashboard still `pending`
    pub total_pending_requests: usize,
    /// Requests modified this cycle
    pub total_modified_requests: usize,
    /// Applications listed on this dashboard
    pub total_applications: usize,
}

/// Application owner dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOwnerStats {
    /// Applications listed on this dashboard
    pub total_applications: usize,
    /// Review items of this dashboard still `pending`
    pub total_pending_requests: usize,
    /// Approvals completed
    pub total_completed_approvals: usize,
    /// Reporting managers
    pub total_reporting_managers: usize,
}

/// Business owner dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOwnerStats {
    /// Applications listed on this dashboard
    pub total_applications: usize,
    /// Application owners
    pub total_app_owners: usize,
    /// Review items of this dashboard still `pending`
    pub total_pending_requests: usize,
}

/// Admin dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Applications listed on this dashboard
    pub total_applications: usize,
    /// Business owners
    pub total_business_owners: usize,
    /// Application owners
    pub total_application_owners: usize,
    /// Reporting managers
    pub total_reporting_managers: usize,
}

/// Serializes as `{}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmptyStats {}

/// Statistics for one dashboard, serialized without a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    /// `role=manager`
    Manager(ManagerStats),
    /// `role=app_owner`
    AppOwner(AppOwnerStats),
    /// `role=business_owner`
    BusinessOwner(BusinessOwnerStats),
    /// `role=admin`
    Admin(AdminStats),
    /// No or unrecognized role
    Empty(EmptyStats),
}

fn applications_in(state: &GovernanceState, category: ApplicationCategory) -> usize {
    state
        .applications
        .iter()
        .filter(|a| a.category == category)
        .count()
}

fn pending_review_items(state: &GovernanceState, kind: RequestKind) -> usize {
    state
        .requests
        .iter()
        .filter(|r| r.kind == kind && r.status == RequestStatus::Pending)
        .count()
}

/// Compute the statistics shown on `role`'s dashboard.
#[must_use]
pub fn dashboard_stats(state: &GovernanceState, role: Option<RoleCategory>) -> DashboardStats {
    let Some(role) = role else {
        return DashboardStats::Empty(EmptyStats {});
    };

    match role {
        RoleCategory::Manager => DashboardStats::Manager(ManagerStats {
            total_users: MANAGER_TOTAL_USERS,
            total_pending_requests: pending_review_items(state, RequestKind::Manager),
            total_modified_requests: MANAGER_MODIFIED_REQUESTS,
            total_applications: applications_in(state, ApplicationCategory::Team),
        }),
        RoleCategory::AppOwner => DashboardStats::AppOwner(AppOwnerStats {
            total_applications: applications_in(state, ApplicationCategory::AppOwner),
            total_pending_requests: pending_review_items(state, RequestKind::AppOwner),
            total_completed_approvals: APP_OWNER_COMPLETED_APPROVALS,
            total_reporting_managers: APP_OWNER_REPORTING_MANAGERS,
        }),
        RoleCategory::BusinessOwner => DashboardStats::BusinessOwner(BusinessOwnerStats {
            total_applications: applications_in(state, ApplicationCategory::BusinessOwner),
            total_app_owners: BUSINESS_OWNER_APP_OWNERS,
            total_pending_requests: pending_review_items(state, RequestKind::BusinessOwner),
        }),
        RoleCategory::Admin => DashboardStats::Admin(AdminStats {
            total_applications: state.applications.len(),
            total_business_owners: ADMIN_BUSINESS_OWNERS,
            total_application_owners: ADMIN_APPLICATION_OWNERS,
            total_reporting_managers: ADMIN_REPORTING_MANAGERS,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::seed::demo_state;
    use access_gov_testing::fixtures;
    use serde_json::json;

    #[test]
    fn manager_stats_on_demo_data() {
        let stats = dashboard_stats(&demo_state(), Some(RoleCategory::Manager));
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({
                "totalUsers": 124,
                "totalPendingRequests": 2,
                "totalModifiedRequests": 12,
                "totalApplications": 3
            })
        );
    }

    #[test]
    fn owner_and_admin_stats_on_demo_data() {
        let state = demo_state();

        assert_eq!(
            dashboard_stats(&state, Some(RoleCategory::AppOwner)),
            DashboardStats::AppOwner(AppOwnerStats {
                total_applications: 2,
                total_pending_requests: 1,
                total_completed_approvals: 145,
                total_reporting_managers: 8,
            })
        );
        assert_eq!(
            dashboard_stats(&state, Some(RoleCategory::BusinessOwner)),
            DashboardStats::BusinessOwner(BusinessOwnerStats {
                total_applications: 1,
                total_app_owners: 12,
                total_pending_requests: 1,
            })
        );
        assert_eq!(
            dashboard_stats(&state, Some(RoleCategory::Admin)),
            DashboardStats::Admin(AdminStats {
                total_applications: 6,
                total_business_owners: 34,
                total_application_owners: 89,
                total_reporting_managers: 245,
            })
        );
    }

    #[test]
    fn no_role_is_empty_object() {
        let stats = dashboard_stats(&demo_state(), None);
        assert_eq!(serde_json::to_value(stats).unwrap(), json!({}));
    }

    #[test]
    fn raised_requests_do_not_count_as_pending_review_items() {
        let mut state = GovernanceState::new();
        state.requests.push(fixtures::access_request("REQ-1").build());
        state
            .requests
            .push(fixtures::review_item("REQ-2", RequestKind::Manager).build());
        state.requests.push(
            fixtures::review_item("REQ-3", RequestKind::Manager)
                .status(RequestStatus::Approved)
                .build(),
        );

        let DashboardStats::Manager(stats) = dashboard_stats(&state, Some(RoleCategory::Manager))
        else {
            panic!("expected manager stats");
        };
        assert_eq!(stats.total_pending_requests, 1);
        assert_eq!(stats.total_applications, 0);
    }
}
