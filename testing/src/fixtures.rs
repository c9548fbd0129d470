//! Record fixtures with sensible defaults.
//!
//! Each builder starts from a valid record and lets a test override only the
//! fields it cares about.

use access_gov_core::model::{
    AccessRequest, Application, ApplicationCategory, ModuleSet, RequestKind, RequestStatus,
    RequestedAction, RoleCategory, UserAccessGrant,
};
use chrono::{NaiveDate, TimeZone, Utc};

fn modules(names: &[&str]) -> ModuleSet {
    names.iter().copied().collect()
}

/// Builder for [`Application`] records
#[derive(Debug, Clone)]
pub struct ApplicationBuilder(Application);

/// An application in the `team` category owned by Alice and Bob.
#[must_use]
pub fn application(id: &str, name: &str) -> ApplicationBuilder {
    ApplicationBuilder(Application {
        id: id.to_string(),
        application_name: name.to_string(),
        user_count: 0,
        application_owner_name: "Alice Owner".to_string(),
        business_owner_name: "Bob Business".to_string(),
        pending_requests_count: 0,
        last_review_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        modules: ModuleSet::new(),
        category: ApplicationCategory::Team,
    })
}

impl ApplicationBuilder {
    /// Set the dashboard category
    #[must_use]
    pub const fn category(mut self, category: ApplicationCategory) -> Self {
        self.0.category = category;
        self
    }

    /// Set both owner names
    #[must_use]
    pub fn owners(mut self, owner: &str, business_owner: &str) -> Self {
        self.0.application_owner_name = owner.to_string();
        self.0.business_owner_name = business_owner.to_string();
        self
    }

    /// Set the grantable modules
    #[must_use]
    pub fn modules(mut self, names: &[&str]) -> Self {
        self.0.modules = modules(names);
        self
    }

    /// Finish the record
    #[must_use]
    pub fn build(self) -> Application {
        self.0
    }
}

/// Builder for [`AccessRequest`] records
#[derive(Debug, Clone)]
pub struct AccessRequestBuilder(AccessRequest);

/// A two-step access request from Alice for Jira, awaiting the application owner.
#[must_use]
pub fn access_request(id: &str) -> AccessRequestBuilder {
    AccessRequestBuilder(AccessRequest {
        id: id.to_string(),
        user_name: "Alice".to_string(),
        user_email: "alice@example.com".to_string(),
        employee_id: None,
        department: None,
        role: "User".to_string(),
        application_name: "Jira".to_string(),
        modules: None,
        requested_action: RequestedAction::AccessRequest,
        reporting_manager_name: None,
        application_owner_name: None,
        submitted_date: Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default(),
        status: RequestStatus::PendingAppOwner,
        kind: RequestKind::AccessRequest,
        initiated_by: Some(RoleCategory::Manager),
    })
}

/// A seeded-style review item awaiting a single decision.
#[must_use]
pub fn review_item(id: &str, kind: RequestKind) -> AccessRequestBuilder {
    access_request(id)
        .status(RequestStatus::Pending)
        .kind(kind)
        .action(RequestedAction::Retain)
        .initiated_by(None)
}

impl AccessRequestBuilder {
    /// Set the requester
    #[must_use]
    pub fn user(mut self, name: &str, email: &str) -> Self {
        self.0.user_name = name.to_string();
        self.0.user_email = email.to_string();
        self
    }

    /// Set the target application
    #[must_use]
    pub fn application(mut self, name: &str) -> Self {
        self.0.application_name = name.to_string();
        self
    }

    /// Set the requested modules
    #[must_use]
    pub fn modules(mut self, names: &[&str]) -> Self {
        self.0.modules = Some(modules(names));
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: RequestStatus) -> Self {
        self.0.status = status;
        self
    }

    /// Set the classification tag
    #[must_use]
    pub const fn kind(mut self, kind: RequestKind) -> Self {
        self.0.kind = kind;
        self
    }

    /// Set the requested action
    #[must_use]
    pub const fn action(mut self, action: RequestedAction) -> Self {
        self.0.requested_action = action;
        self
    }

    /// Set the initiating role
    #[must_use]
    pub const fn initiated_by(mut self, role: Option<RoleCategory>) -> Self {
        self.0.initiated_by = role;
        self
    }

    /// Finish the record
    #[must_use]
    pub fn build(self) -> AccessRequest {
        self.0
    }
}

/// A grant with role `User`.
#[must_use]
pub fn grant(id: &str, user: &str, application: &str, module_names: &[&str]) -> UserAccessGrant {
    UserAccessGrant {
        id: id.to_string(),
        user_name: user.to_string(),
        application_name: application.to_string(),
        modules: modules(module_names),
        role: "User".to_string(),
    }
}
