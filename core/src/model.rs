//! Domain records of the access governance service.
//!
//! Three record kinds make up the store: [`Application`] (the catalog),
//! [`AccessRequest`] (the approval chain) and [`UserAccessGrant`] (who holds
//! which modules). Wire names are camelCase so the existing dashboards can
//! consume the records unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role category of a dashboard caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Reporting manager: raises requests for their team
    Manager,
    /// Application owner: first approval step
    AppOwner,
    /// Business owner: second approval step
    BusinessOwner,
    /// Administrator: manages the catalog
    Admin,
}

impl RoleCategory {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::AppOwner => "app_owner",
            Self::BusinessOwner => "business_owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role selector names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for RoleCategory {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "app_owner" => Ok(Self::AppOwner),
            "business_owner" => Ok(Self::BusinessOwner),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Ordered, duplicate-free set of module names.
///
/// Names are trimmed; blank names are dropped. The first occurrence of a name
/// wins, so insertion order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ModuleSet(Vec<String>);

impl ModuleSet {
    /// Creates an empty module set
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a module, returning `false` if it was blank or already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    /// Whether a module with this exact name is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|m| m == name)
    }

    /// Number of modules
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no modules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Module names in insertion order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl From<Vec<String>> for ModuleSet {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}

impl From<ModuleSet> for Vec<String> {
    fn from(set: ModuleSet) -> Self {
        set.0
    }
}

/// Which dashboard an application belongs to.
///
/// Replaces the old convention of encoding the category inside the
/// identifier (`APP-OWN-…`, `APP-BUS-…`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationCategory {
    /// Applications used by a reporting manager's team
    #[default]
    Team,
    /// Applications managed on the application-owner dashboard
    AppOwner,
    /// Applications managed on the business-owner dashboard
    BusinessOwner,
}

impl ApplicationCategory {
    /// Category a role is scoped to; `None` means every category.
    #[must_use]
    pub const fn for_role(role: RoleCategory) -> Option<Self> {
        match role {
            RoleCategory::Manager => Some(Self::Team),
            RoleCategory::AppOwner => Some(Self::AppOwner),
            RoleCategory::BusinessOwner => Some(Self::BusinessOwner),
            RoleCategory::Admin => None,
        }
    }
}

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Identifier, e.g. `APP-6000`
    pub id: String,
    /// Display name, also the join key used by requests and grants
    pub application_name: String,
    /// Number of users holding access
    pub user_count: u32,
    /// Application owner
    pub application_owner_name: String,
    /// Business owner
    pub business_owner_name: String,
    /// Open requests against this application
    pub pending_requests_count: u32,
    /// Date of the last access review
    pub last_review_date: NaiveDate,
    /// Modules that can be granted
    pub modules: ModuleSet,
    /// Dashboard the application is listed on
    pub category: ApplicationCategory,
}

/// What the requester wants done with the user's access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedAction {
    /// Keep the current access (quarterly review)
    Retain,
    /// Remove the access
    Revoke,
    /// Change the access
    Modify,
    /// Grant new access
    AccessRequest,
}

/// Position of a request in the approval chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Single-step review item awaiting a decision
    Pending,
    /// Awaiting the application owner
    PendingAppOwner,
    /// Awaiting the business owner
    PendingBusinessOwner,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
}

impl RequestStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingAppOwner => "pending_app_owner",
            Self::PendingBusinessOwner => "pending_business_owner",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// `approved` and `rejected` end the chain
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification tag of a request, serialized as `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Review item on the manager dashboard
    Manager,
    /// Review item on the application-owner dashboard
    AppOwner,
    /// Review item on the business-owner dashboard
    BusinessOwner,
    /// Request raised through the two-step approval chain
    AccessRequest,
}

/// A request to grant, keep, change or revoke a user's access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    /// Identifier, e.g. `REQ-1700000000000`
    pub id: String,
    /// User the request is about
    pub user_name: String,
    /// That user's email
    pub user_email: String,
    /// Employee number, if supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Department, if supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Role label the user holds or will hold
    pub role: String,
    /// Target application name
    pub application_name: String,
    /// Requested modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModuleSet>,
    /// Requested action
    pub requested_action: RequestedAction,
    /// Manager responsible for the user (review items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_manager_name: Option<String>,
    /// Owner of the target application (review items)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_owner_name: Option<String>,
    /// When the request was submitted
    pub submitted_date: DateTime<Utc>,
    /// Current position in the approval chain
    pub status: RequestStatus,
    /// Classification tag
    #[serde(rename = "type")]
    pub kind: RequestKind,
    /// Role that raised the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiated_by: Option<RoleCategory>,
}

/// A record asserting that a user holds some modules of an application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessGrant {
    /// Identifier, e.g. `USR-1000`
    pub id: String,
    /// Holder of the access
    pub user_name: String,
    /// Application the access is for
    pub application_name: String,
    /// Granted modules
    pub modules: ModuleSet,
    /// Role label
    pub role: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn module_set_drops_blanks_and_duplicates() {
        let set: ModuleSet = ["EC2", " S3 ", "", "EC2", "RDS"].into_iter().collect();
        assert_eq!(set.as_slice(), ["EC2", "S3", "RDS"]);
    }

    #[test]
    fn module_set_deserializes_normalized() {
        let set: ModuleSet = serde_json::from_value(json!(["Board", "Board", "Wiki"])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["Board", "Wiki"]));
    }

    #[test]
    fn role_parses_wire_names_only() {
        assert_eq!("app_owner".parse::<RoleCategory>(), Ok(RoleCategory::AppOwner));
        assert!("business".parse::<RoleCategory>().is_err());
        assert_eq!(RoleCategory::BusinessOwner.to_string(), "business_owner");
    }

    #[test]
    fn request_uses_dashboard_field_names() {
        let request = AccessRequest {
            id: "REQ-1".to_string(),
            user_name: "Alice".to_string(),
            user_email: "alice@example.com".to_string(),
            employee_id: None,
            department: None,
            role: "User".to_string(),
            application_name: "Jira".to_string(),
            modules: Some(["Board"].into_iter().collect()),
            requested_action: RequestedAction::AccessRequest,
            reporting_manager_name: None,
            application_owner_name: None,
            submitted_date: "2024-01-01T00:00:00Z".parse().unwrap(),
            status: RequestStatus::PendingAppOwner,
            kind: RequestKind::AccessRequest,
            initiated_by: Some(RoleCategory::Manager),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userName"], "Alice");
        assert_eq!(value["status"], "pending_app_owner");
        assert_eq!(value["type"], "access_request");
        assert_eq!(value["requestedAction"], "access_request");
        assert_eq!(value["initiatedBy"], "manager");
        assert!(value.get("employeeId").is_none());
    }

    #[test]
    fn terminal_statuses() {
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::PendingBusinessOwner.is_terminal());
    }

    proptest::proptest! {
        #[test]
        fn module_set_never_holds_duplicates(names in proptest::collection::vec("[a-c ]{0,3}", 0..20)) {
            let set: ModuleSet = names.iter().cloned().collect();
            let mut seen = std::collections::HashSet::new();
            for name in set.as_slice() {
                proptest::prop_assert!(!name.is_empty());
                proptest::prop_assert_eq!(name.trim(), name.as_str());
                proptest::prop_assert!(seen.insert(name.clone()));
            }
        }
    }

    #[test]
    fn admin_sees_every_category() {
        assert_eq!(ApplicationCategory::for_role(RoleCategory::Admin), None);
        assert_eq!(
            ApplicationCategory::for_role(RoleCategory::Manager),
            Some(ApplicationCategory::Team)
        );
    }
}
