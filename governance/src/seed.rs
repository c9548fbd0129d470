//! Demo records loaded at startup.

use crate::state::GovernanceState;
use access_gov_core::model::{
    AccessRequest, Application, ApplicationCategory, RequestKind, RequestStatus, RequestedAction,
    UserAccessGrant,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn application(
    id: &str,
    name: &str,
    user_count: u32,
    owners: (&str, &str),
    pending: u32,
    last_review: NaiveDate,
    modules: &[&str],
    category: ApplicationCategory,
) -> Application {
    Application {
        id: id.to_string(),
        application_name: name.to_string(),
        user_count,
        application_owner_name: owners.0.to_string(),
        business_owner_name: owners.1.to_string(),
        pending_requests_count: pending,
        last_review_date: last_review,
        modules: modules.iter().copied().collect(),
        category,
    }
}

struct ReviewItem<'a> {
    id: &'a str,
    user: (&'a str, &'a str),
    role: &'a str,
    application: &'a str,
    action: RequestedAction,
    submitted: DateTime<Utc>,
    kind: RequestKind,
}

impl ReviewItem<'_> {
    fn into_request(self) -> AccessRequest {
        AccessRequest {
            id: self.id.to_string(),
            user_name: self.user.0.to_string(),
            user_email: self.user.1.to_string(),
            employee_id: None,
            department: None,
            role: self.role.to_string(),
            application_name: self.application.to_string(),
            modules: None,
            requested_action: self.action,
            reporting_manager_name: None,
            application_owner_name: None,
            submitted_date: self.submitted,
            status: RequestStatus::Pending,
            kind: self.kind,
            initiated_by: None,
        }
    }
}

fn grant(id: &str, user: &str, application: &str, modules: &[&str], role: &str) -> UserAccessGrant {
    UserAccessGrant {
        id: id.to_string(),
        user_name: user.to_string(),
        application_name: application.to_string(),
        modules: modules.iter().copied().collect(),
        role: role.to_string(),
    }
}

/// The demo catalog, review queue and grants the dashboards were built against.
#[must_use]
pub fn demo_state() -> GovernanceState {
    use ApplicationCategory::{AppOwner, BusinessOwner, Team};

    let applications = vec![
        application(
            "APP-6000",
            "Jira",
            45,
            ("Sarah Connor", "Robert California"),
            3,
            date(2023, 10, 1),
            &["Issue Tracking", "Scrum Board", "Kanban", "Reporting"],
            Team,
        ),
        application(
            "APP-6001",
            "Confluence",
            30,
            ("John Doe", "David Wallace"),
            2,
            date(2023, 9, 15),
            &["Documentation", "Team Collaboration", "Whiteboards"],
            Team,
        ),
        application(
            "APP-6002",
            "AWS Console",
            12,
            ("Sarah Connor", "Robert California"),
            5,
            date(2023, 11, 20),
            &["EC2", "S3", "RDS", "Lambda", "IAM"],
            Team,
        ),
        application(
            "APP-OWN-2000",
            "Payment Gateway",
            120,
            ("John Doe", "Michael Scott"),
            8,
            date(2023, 10, 25),
            &["Transactions", "Refunds", "Settlements"],
            AppOwner,
        ),
        application(
            "APP-OWN-2001",
            "Customer Portal",
            250,
            ("John Doe", "David Wallace"),
            15,
            date(2023, 11, 1),
            &["Profile", "Orders", "Support"],
            AppOwner,
        ),
        application(
            "APP-BUS-3000",
            "Salesforce",
            300,
            ("David Wallace", "Michael Scott"),
            20,
            date(2023, 8, 10),
            &["Sales Cloud", "Service Cloud", "Marketing Cloud"],
            BusinessOwner,
        ),
    ];

    let mut app_owner_item = ReviewItem {
        id: "APP-REQ-2000",
        user: ("John Doe", "john@example.com"),
        role: "Developer",
        application: "Payment Gateway",
        action: RequestedAction::Modify,
        submitted: at(2023, 11, 28, 9, 15),
        kind: RequestKind::AppOwner,
    }
    .into_request();
    app_owner_item.reporting_manager_name = Some("Manager Mike".to_string());

    let mut business_item = ReviewItem {
        id: "BUS-REQ-3000",
        user: ("Michael Scott", "michael@dunder.com"),
        role: "Branch Manager",
        application: "Salesforce",
        action: RequestedAction::Retain,
        submitted: at(2023, 11, 29, 11, 45),
        kind: RequestKind::BusinessOwner,
    }
    .into_request();
    business_item.application_owner_name = Some("David Wallace".to_string());

    let requests = vec![
        ReviewItem {
            id: "REQ-1000",
            user: ("Alice Smith", "alice@example.com"),
            role: "Admin",
            application: "Jira",
            action: RequestedAction::Retain,
            submitted: at(2023, 11, 25, 10, 0),
            kind: RequestKind::Manager,
        }
        .into_request(),
        ReviewItem {
            id: "REQ-1001",
            user: ("Bob Johnson", "bob@company.com"),
            role: "Editor",
            application: "Confluence",
            action: RequestedAction::Revoke,
            submitted: at(2023, 11, 26, 14, 30),
            kind: RequestKind::Manager,
        }
        .into_request(),
        app_owner_item,
        business_item,
    ];

    let grants = vec![
        grant(
            "USR-1000",
            "Alice Smith",
            "Jira",
            &["Issue Tracking", "Scrum Board"],
            "Admin",
        ),
        grant("USR-1001", "Bob Johnson", "Confluence", &["Pages"], "Editor"),
    ];

    GovernanceState {
        applications,
        requests,
        grants,
    }
}
