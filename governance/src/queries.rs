//! Read-side views over the record store.

use crate::state::GovernanceState;
use access_gov_core::model::{
    AccessRequest, Application, ApplicationCategory, RequestKind, RequestStatus, RoleCategory,
};
use serde::Serialize;

/// Applications listed on `role`'s dashboard.
///
/// Admins and callers without a recognized role see the whole catalog.
#[must_use]
pub fn applications_for(state: &GovernanceState, role: Option<RoleCategory>) -> Vec<Application> {
    let category = role.and_then(ApplicationCategory::for_role);
    state
        .applications
        .iter()
        .filter(|app| category.is_none_or(|c| app.category == c))
        .cloned()
        .collect()
}

fn visible_to(request: &AccessRequest, role: RoleCategory) -> bool {
    match role {
        RoleCategory::Manager => {
            request.kind == RequestKind::Manager
                || request.initiated_by == Some(RoleCategory::Manager)
        },
        RoleCategory::AppOwner => request.status == RequestStatus::PendingAppOwner,
        RoleCategory::BusinessOwner => request.status == RequestStatus::PendingBusinessOwner,
        RoleCategory::Admin => true,
    }
}

/// Requests shown on `role`'s dashboard.
///
/// Owners see what awaits their approval step; managers see their review
/// items and the requests they raised.
#[must_use]
pub fn requests_for(state: &GovernanceState, role: Option<RoleCategory>) -> Vec<AccessRequest> {
    state
        .requests
        .iter()
        .filter(|r| role.is_none_or(|role| visible_to(r, role)))
        .cloned()
        .collect()
}

/// Distinct owner names across the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnersDirectory {
    /// Application owners, first appearance first
    pub owners: Vec<String>,
    /// Business owners, first appearance first
    pub business_owners: Vec<String>,
}

fn push_distinct(names: &mut Vec<String>, name: &str) {
    let name = name.trim();
    if !name.is_empty() && !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

/// Collect the owners directory.
#[must_use]
pub fn owners(state: &GovernanceState) -> OwnersDirectory {
    let mut directory = OwnersDirectory::default();
    for app in &state.applications {
        push_distinct(&mut directory.owners, &app.application_owner_name);
        push_distinct(&mut directory.business_owners, &app.business_owner_name);
    }
    directory
}
