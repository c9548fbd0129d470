//! End-to-end tests of the dashboard API over the full router.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use access_gov::{AppState, Config, build_app};
use access_gov_runtime::metrics::MetricsExporter;
use access_gov_web::CORRELATION_ID_HEADER;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};

fn server_with(vars: &[(&str, &str)]) -> TestServer {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let config = Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    });

    let state = AppState::from_config(&config, MetricsExporter::disabled());
    TestServer::new(build_app(state, None)).unwrap()
}

fn demo_server() -> TestServer {
    server_with(&[])
}

fn empty_server() -> TestServer {
    server_with(&[("SEED_DEMO_DATA", "false")])
}

async fn list(server: &TestServer, path: &str, role: Option<&str>) -> Vec<Value> {
    let mut request = server.get(path);
    if let Some(role) = role {
        request = request.add_query_param("role", role);
    }
    let response = request.await;
    response.assert_status_ok();
    response.json()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn login_then_otp() {
    let server = demo_server();

    let login = server
        .post("/api/login")
        .json(&json!({ "username": "app_owner", "password": "password123" }))
        .await;
    login.assert_status_ok();
    let body: Value = login.json();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["requireOtp"], json!(true));
    assert!(body.get("token").is_none());

    let verified = server
        .post("/api/verify-otp")
        .json(&json!({ "username": "app_owner", "otp": "123456" }))
        .await;
    verified.assert_status_ok();
    verified.assert_json(&json!({
        "success": true,
        "role": "app_owner",
        "redirect": "/app-owner",
        "token": "mock-jwt-app-owner"
    }));
}

#[tokio::test]
async fn login_without_otp_signs_in_directly() {
    let server = server_with(&[("AUTH_REQUIRE_OTP", "false")]);

    let response = server
        .post("/api/login")
        .json(&json!({ "username": "business", "password": "password123" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["role"], json!("business_owner"));
    assert_eq!(body["redirect"], json!("/business-owner"));
}

#[tokio::test]
async fn login_failures() {
    let server = demo_server();

    let missing = server
        .post("/api/login")
        .json(&json!({ "username": "manager" }))
        .await;
    missing.assert_status_bad_request();
    missing.assert_json(&json!({
        "success": false,
        "code": "BAD_REQUEST",
        "message": "Username and password required"
    }));

    let wrong = server
        .post("/api/login")
        .json(&json!({ "username": "manager", "password": "nope" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json::<Value>()["message"], json!("Invalid credentials"));

    let unknown = server
        .post("/api/login")
        .json(&json!({ "username": "ghost", "password": "password123" }))
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json::<Value>()["message"], json!("User not found"));

    let bad_otp = server
        .post("/api/verify-otp")
        .json(&json!({ "username": "admin", "otp": "000000" }))
        .await;
    bad_otp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(bad_otp.json::<Value>()["message"], json!("Invalid OTP"));
}

// ============================================================================
// Read side
// ============================================================================

#[tokio::test]
async fn dashboard_stats_per_role() {
    let server = demo_server();

    server
        .get("/api/dashboard/stats")
        .add_query_param("role", "manager")
        .await
        .assert_json(&json!({
            "totalUsers": 124,
            "totalPendingRequests": 2,
            "totalModifiedRequests": 12,
            "totalApplications": 3
        }));

    server
        .get("/api/dashboard/stats")
        .add_query_param("role", "admin")
        .await
        .assert_json(&json!({
            "totalApplications": 6,
            "totalBusinessOwners": 34,
            "totalApplicationOwners": 89,
            "totalReportingManagers": 245
        }));

    server
        .get("/api/dashboard/stats")
        .add_query_param("role", "auditor")
        .await
        .assert_json(&json!({}));
    server.get("/api/dashboard/stats").await.assert_json(&json!({}));
}

#[tokio::test]
async fn listings_filter_by_role() {
    let server = demo_server();

    assert_eq!(list(&server, "/api/applications", Some("manager")).await.len(), 3);
    assert_eq!(list(&server, "/api/applications", Some("app_owner")).await.len(), 2);
    assert_eq!(list(&server, "/api/applications", Some("business_owner")).await.len(), 1);
    assert_eq!(list(&server, "/api/applications", None).await.len(), 6);

    let jira = &list(&server, "/api/applications", Some("manager")).await[0];
    assert_eq!(jira["applicationOwnerName"], json!("Sarah Connor"));
    assert_eq!(jira["lastReviewDate"], json!("2023-10-01"));
    assert_eq!(jira["category"], json!("team"));

    let manager_requests = list(&server, "/api/requests", Some("manager")).await;
    assert_eq!(manager_requests.len(), 2);
    assert_eq!(manager_requests[0]["type"], json!("manager"));

    assert!(list(&server, "/api/requests", Some("app_owner")).await.is_empty());
    assert_eq!(list(&server, "/api/requests", None).await.len(), 4);
    assert_eq!(list(&server, "/api/users", None).await.len(), 2);
}

#[tokio::test]
async fn owners_directory() {
    demo_server().get("/api/owners").await.assert_json(&json!({
        "owners": ["Sarah Connor", "John Doe", "David Wallace"],
        "businessOwners": ["Robert California", "David Wallace", "Michael Scott"]
    }));
}

// ============================================================================
// Approval chain
// ============================================================================

#[tokio::test]
async fn alice_jira_board_walkthrough() {
    let server = empty_server();

    let raised = server
        .post("/api/requests")
        .json(&json!({
            "userName": "Alice",
            "userEmail": "alice@example.com",
            "applicationName": "Jira",
            "modules": ["Board"]
        }))
        .await;
    raised.assert_status(StatusCode::CREATED);
    let body: Value = raised.json();
    assert_eq!(body["message"], json!("Request submitted successfully"));
    assert_eq!(body["request"]["status"], json!("pending_app_owner"));
    assert_eq!(body["request"]["initiatedBy"], json!("manager"));
    let id = body["request"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("REQ-"));

    let queue = list(&server, "/api/requests", Some("app_owner")).await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"], json!(id));

    let first = server.post(&format!("/api/requests/{id}/approve")).await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(
        body["message"],
        json!("Approved by Application Owner. Pending Business Owner approval.")
    );
    assert_eq!(body["request"]["status"], json!("pending_business_owner"));
    assert!(body.get("grant").is_none());
    assert!(list(&server, "/api/users", None).await.is_empty());
    assert_eq!(list(&server, "/api/requests", Some("business_owner")).await.len(), 1);

    let second = server.post(&format!("/api/requests/{id}/approve")).await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert_eq!(body["message"], json!("Approved by Business Owner. Access granted."));
    assert_eq!(body["request"]["status"], json!("approved"));

    let grants = list(&server, "/api/users", None).await;
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["userName"], json!("Alice"));
    assert_eq!(grants[0]["applicationName"], json!("Jira"));
    assert_eq!(grants[0]["modules"], json!(["Board"]));
    assert_eq!(grants[0]["role"], json!("User"));
}

#[tokio::test]
async fn raise_requires_user_and_application() {
    let server = empty_server();

    let response = server
        .post("/api/requests")
        .json(&json!({ "applicationName": "Jira" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], json!("User name is required"));
    assert!(list(&server, "/api/requests", None).await.is_empty());
}

#[tokio::test]
async fn review_items_approve_in_one_step_without_grant() {
    let server = demo_server();

    let response = server.post("/api/requests/REQ-1000/approve").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], json!("Request approved"));
    assert_eq!(list(&server, "/api/users", None).await.len(), 2);
}

#[tokio::test]
async fn reject_and_legacy_reapproval() {
    let server = demo_server();

    let rejected = server.post("/api/requests/REQ-1001/reject").await;
    rejected.assert_status_ok();
    let body: Value = rejected.json();
    assert_eq!(body["message"], json!("Request rejected"));
    assert_eq!(body["request"]["status"], json!("rejected"));

    let reapproved = server.post("/api/requests/REQ-1001/approve").await;
    reapproved.assert_status_ok();
    assert_eq!(reapproved.json::<Value>()["request"]["status"], json!("approved"));
}

#[tokio::test]
async fn strict_policy_refuses_decided_requests() {
    let server = server_with(&[("APPROVAL_POLICY", "strict")]);

    server.post("/api/requests/REQ-1001/reject").await.assert_status_ok();

    let again = server.post("/api/requests/REQ-1001/approve").await;
    again.assert_status(StatusCode::CONFLICT);
    again.assert_json(&json!({
        "success": false,
        "code": "CONFLICT",
        "message": "Request REQ-1001 is already rejected"
    }));
}

#[tokio::test]
async fn unknown_request_is_not_found() {
    let server = demo_server();

    for action in ["approve", "reject"] {
        let response = server
            .post(&format!("/api/requests/REQ-404/{action}"))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({
            "success": false,
            "code": "NOT_FOUND",
            "message": "Request not found"
        }));
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn create_application_with_defaults() {
    let server = demo_server();

    let response = server
        .post("/api/applications")
        .json(&json!({
            "applicationName": "Workday",
            "owner": "Jane Roe",
            "businessOwner": "Jim Poe",
            "modules": ["HR", "Payroll", "HR"]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], json!("Application created successfully"));
    assert_eq!(body["application"]["userCount"], json!(0));
    assert_eq!(body["application"]["pendingRequestsCount"], json!(0));
    assert_eq!(body["application"]["modules"], json!(["HR", "Payroll"]));
    assert_eq!(body["application"]["category"], json!("team"));

    assert_eq!(list(&server, "/api/applications", Some("manager")).await.len(), 4);
}

#[tokio::test]
async fn create_application_without_business_owner_adds_nothing() {
    let server = demo_server();

    let response = server
        .post("/api/applications")
        .json(&json!({ "applicationName": "Workday", "applicationOwnerName": "Jane Roe" }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["message"], json!("Business owner is required"));
    assert_eq!(list(&server, "/api/applications", None).await.len(), 6);
}

// ============================================================================
// Grants
// ============================================================================

#[tokio::test]
async fn update_grant_replaces_modules() {
    let server = demo_server();

    let response = server
        .put("/api/users/USR-1000")
        .json(&json!({ "modules": ["Kanban"] }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], json!("User access updated"));
    assert_eq!(body["user"]["modules"], json!(["Kanban"]));

    let missing = server
        .put("/api/users/USR-404")
        .json(&json!({ "modules": [] }))
        .await;
    missing.assert_status_not_found();
}

#[tokio::test]
async fn delete_grant() {
    let server = demo_server();

    let unknown = server.delete("/api/users/USR-404").await;
    unknown.assert_status_not_found();
    assert_eq!(unknown.json::<Value>()["message"], json!("User not found"));
    assert_eq!(list(&server, "/api/users", None).await.len(), 2);

    let removed = server.delete("/api/users/USR-1000").await;
    removed.assert_status_ok();
    assert_eq!(removed.json::<Value>()["message"], json!("User access removed"));

    let remaining = list(&server, "/api/users", None).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], json!("USR-1001"));
}

#[tokio::test]
async fn bulk_revoke_by_user_name() {
    let server = demo_server();

    server.delete("/api/users").await.assert_status_bad_request();

    let none = server
        .delete("/api/users")
        .add_query_param("userName", "Nobody")
        .await;
    none.assert_status_ok();
    assert_eq!(none.json::<Value>()["removed"], json!(0));

    let padded = server
        .delete("/api/users")
        .add_query_param("userName", "  Alice Smith  ")
        .await;
    padded.assert_status_ok();
    assert_eq!(padded.json::<Value>()["removed"], json!(0));
    assert_eq!(list(&server, "/api/users", None).await.len(), 2);

    let alice = server
        .delete("/api/users")
        .add_query_param("userName", "Alice Smith")
        .await;
    alice.assert_status_ok();
    assert_eq!(alice.json::<Value>()["removed"], json!(1));

    let remaining = list(&server, "/api/users", None).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["userName"], json!("Bob Johnson"));
}

// ============================================================================
// Operations
// ============================================================================

#[tokio::test]
async fn health_and_readiness() {
    let server = demo_server();

    server.get("/health").await.assert_json(&json!({ "status": "ok" }));

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], json!("healthy"));
}

#[tokio::test]
async fn metrics_disabled_is_not_found() {
    demo_server().get("/metrics").await.assert_status_not_found();
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let server = demo_server();
    let name = HeaderName::from_static("x-correlation-id");
    let id = "0b6e4b5e-3f0a-4c55-9c1e-5d7a1f0e2a11";

    let response = server
        .post("/api/requests/REQ-1000/reject")
        .add_header(name.clone(), HeaderValue::from_static(id))
        .await;
    response.assert_status_ok();
    assert_eq!(response.header(&name), id);
    assert!(CORRELATION_ID_HEADER.eq_ignore_ascii_case(name.as_str()));
}

#[tokio::test]
async fn concurrent_writes_sharing_a_correlation_id_get_their_own_responses() {
    use std::future::IntoFuture;

    let server = demo_server();
    let name = HeaderName::from_static("x-correlation-id");
    let shared = HeaderValue::from_static("7d1c2f44-98b1-4c0e-a1f5-3c2b6e9d0a77");

    let approve = server
        .post("/api/requests/REQ-1000/approve")
        .add_header(name.clone(), shared.clone())
        .into_future();
    let reject = server
        .post("/api/requests/REQ-1001/reject")
        .add_header(name, shared)
        .into_future();
    let (approved, rejected) = tokio::join!(approve, reject);

    approved.assert_status_ok();
    let approved: Value = approved.json();
    assert_eq!(approved["request"]["id"], json!("REQ-1000"));
    assert_eq!(approved["message"], json!("Request approved"));

    rejected.assert_status_ok();
    let rejected: Value = rejected.json();
    assert_eq!(rejected["request"]["id"], json!("REQ-1001"));
    assert_eq!(rejected["request"]["status"], json!("rejected"));
}
