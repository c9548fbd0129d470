//! HTTP handlers for the dashboard API.
//!
//! Reads go straight to the store through [`Store::state`]. Writes go through
//! [`AppState::dispatch`], which waits for the outcome answering the command;
//! the request's correlation id only labels the logs.
//!
//! [`Store::state`]: access_gov_runtime::Store::state

use crate::actions::{ApplicationDraft, GovernanceAction, RequestDraft};
use crate::app::AppState;
use crate::auth::{self, Credentials, LoginOutcome, OtpSubmission, Session};
use crate::queries::{self, OwnersDirectory};
use crate::stats::{self, DashboardStats};
use access_gov_core::model::{AccessRequest, Application, ModuleSet, UserAccessGrant};
use access_gov_web::{ApiJson, AppError, CorrelationId, RoleSelector, WebResult};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

/// Flat success body: `{"success": true, "message": ..., ...payload}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    /// Always `true`
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Operation-specific fields
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    fn json(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }
}

/// `{"application": ...}`
#[derive(Debug, Serialize)]
pub struct ApplicationPayload {
    /// The stored application
    pub application: Application,
}

/// `{"request": ..., "grant"?: ...}`
#[derive(Debug, Serialize)]
pub struct RequestPayload {
    /// The request after the operation
    pub request: AccessRequest,
    /// Grant created by final approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant: Option<UserAccessGrant>,
}

/// `{"user": ...}`
#[derive(Debug, Serialize)]
pub struct GrantPayload {
    /// The grant after the operation
    pub user: UserAccessGrant,
}

/// `{"userName": ..., "removed": n}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedPayload {
    /// User whose grants were removed
    pub user_name: String,
    /// Number of grants removed
    pub removed: usize,
}

/// Body of `PUT /api/users/:id`.
#[derive(Debug, Deserialize)]
pub struct GrantUpdate {
    /// Replacement module set
    pub modules: ModuleSet,
}

/// Query of `DELETE /api/users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeQuery {
    /// Exact user name whose grants go
    pub user_name: Option<String>,
}

/// Response of the login endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Always `true`
    pub success: bool,
    /// Present when a one-time code must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_otp: Option<bool>,
    /// Present when a one-time code must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    /// Role, redirect and token once signed in
    #[serde(flatten)]
    pub session: Option<Session>,
}

impl LoginResponse {
    const fn signed_in(session: Session) -> Self {
        Self {
            success: true,
            require_otp: None,
            message: None,
            session: Some(session),
        }
    }
}

fn unexpected(outcome: &GovernanceAction) -> AppError {
    tracing::error!(?outcome, "Command answered with an unexpected outcome");
    AppError::internal("An internal error occurred")
}

// ============================================================================
// Authentication
// ============================================================================

/// Submit credentials.
///
/// ```text
/// POST /api/login
/// {"username": "manager", "password": "password123"}
/// ```
///
/// # Errors
///
/// 400 on a missing field, 401 on wrong credentials or an unknown account.
#[allow(clippy::unused_async)]
pub async fn login(
    State(app): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> WebResult<Json<LoginResponse>> {
    let response = match auth::login(&app.auth, credentials)? {
        LoginOutcome::OtpRequired => LoginResponse {
            success: true,
            require_otp: Some(true),
            message: Some("OTP sent to your registered device"),
            session: None,
        },
        LoginOutcome::SignedIn(session) => LoginResponse::signed_in(session),
    };
    Ok(Json(response))
}

/// Verify the one-time code that follows a login.
///
/// # Errors
///
/// 400 on a missing field, 401 on a wrong code or an unknown account.
#[allow(clippy::unused_async)]
pub async fn verify_otp(
    State(app): State<AppState>,
    ApiJson(submission): ApiJson<OtpSubmission>,
) -> WebResult<Json<LoginResponse>> {
    let session = auth::verify_otp(&app.auth, submission)?;
    Ok(Json(LoginResponse::signed_in(session)))
}

// ============================================================================
// Read side
// ============================================================================

/// `GET /api/dashboard/stats?role=`
pub async fn dashboard_stats(
    State(app): State<AppState>,
    RoleSelector(role): RoleSelector,
) -> Json<DashboardStats> {
    Json(app.store.state(|s| stats::dashboard_stats(s, role)).await)
}

/// `GET /api/applications?role=`
pub async fn list_applications(
    State(app): State<AppState>,
    RoleSelector(role): RoleSelector,
) -> Json<Vec<Application>> {
    Json(app.store.state(|s| queries::applications_for(s, role)).await)
}

/// `GET /api/requests?role=`
pub async fn list_requests(
    State(app): State<AppState>,
    RoleSelector(role): RoleSelector,
) -> Json<Vec<AccessRequest>> {
    Json(app.store.state(|s| queries::requests_for(s, role)).await)
}

/// `GET /api/users`
pub async fn list_grants(State(app): State<AppState>) -> Json<Vec<UserAccessGrant>> {
    Json(app.store.state(|s| s.grants.clone()).await)
}

/// `GET /api/owners`
pub async fn list_owners(State(app): State<AppState>) -> Json<OwnersDirectory> {
    Json(app.store.state(queries::owners).await)
}

// ============================================================================
// Commands
// ============================================================================

/// Add an application to the catalog.
///
/// ```text
/// POST /api/applications
/// {"applicationName": "Workday", "applicationOwnerName": "Jane Roe",
///  "businessOwnerName": "Jim Poe", "modules": ["HR"], "category": "team"}
/// ```
///
/// # Errors
///
/// 400 when the name or either owner is missing.
pub async fn create_application(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    ApiJson(draft): ApiJson<ApplicationDraft>,
) -> WebResult<(StatusCode, Json<Success<ApplicationPayload>>)> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::CreateApplication {
                correlation_id,
                draft,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::ApplicationCreated { application, .. } => Ok((
            StatusCode::CREATED,
            Success::json(
                "Application created successfully",
                ApplicationPayload { application },
            ),
        )),
        other => Err(unexpected(&other)),
    }
}

/// Raise an access request; it starts at `pending_app_owner`.
///
/// # Errors
///
/// 400 when the user name or application name is missing.
pub async fn raise_request(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    ApiJson(draft): ApiJson<RequestDraft>,
) -> WebResult<(StatusCode, Json<Success<RequestPayload>>)> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::RaiseRequest {
                correlation_id,
                draft,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::RequestRaised { request, .. } => Ok((
            StatusCode::CREATED,
            Success::json(
                "Request submitted successfully",
                RequestPayload {
                    request,
                    grant: None,
                },
            ),
        )),
        other => Err(unexpected(&other)),
    }
}

/// Approve the current step of a request.
///
/// # Errors
///
/// 404 for an unknown id, 409 when the policy refuses a decided request.
pub async fn approve_request(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    Path(request_id): Path<String>,
) -> WebResult<Json<Success<RequestPayload>>> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::ApproveRequest {
                correlation_id,
                request_id,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::RequestAdvanced {
            request,
            grant,
            message,
            ..
        } => Ok(Success::json(message, RequestPayload { request, grant })),
        other => Err(unexpected(&other)),
    }
}

/// Reject a request.
///
/// # Errors
///
/// 404 for an unknown id, 409 when the policy refuses a decided request.
pub async fn reject_request(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    Path(request_id): Path<String>,
) -> WebResult<Json<Success<RequestPayload>>> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::RejectRequest {
                correlation_id,
                request_id,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::RequestRejected { request, .. } => Ok(Success::json(
            crate::lifecycle::REJECTED,
            RequestPayload {
                request,
                grant: None,
            },
        )),
        other => Err(unexpected(&other)),
    }
}

/// Replace the module set of a grant.
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn update_grant(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    Path(grant_id): Path<String>,
    ApiJson(update): ApiJson<GrantUpdate>,
) -> WebResult<Json<Success<GrantPayload>>> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::UpdateGrantModules {
                correlation_id,
                grant_id,
                modules: update.modules,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::GrantModulesUpdated { grant, .. } => {
            Ok(Success::json("User access updated", GrantPayload { user: grant }))
        },
        other => Err(unexpected(&other)),
    }
}

/// Delete one grant.
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn delete_grant(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    Path(grant_id): Path<String>,
) -> WebResult<Json<Success<GrantPayload>>> {
    let outcome = app
        .dispatch(correlation_id, |correlation_id| GovernanceAction::RevokeGrant {
            correlation_id,
            grant_id,
        })
        .await?;

    match outcome {
        GovernanceAction::GrantRevoked { grant, .. } => {
            Ok(Success::json("User access removed", GrantPayload { user: grant }))
        },
        other => Err(unexpected(&other)),
    }
}

/// Delete every grant held by `?userName=`.
///
/// # Errors
///
/// 400 when `userName` is missing.
pub async fn revoke_user_grants(
    State(app): State<AppState>,
    CorrelationId(correlation_id): CorrelationId,
    query: Result<Query<RevokeQuery>, QueryRejection>,
) -> WebResult<Json<Success<RevokedPayload>>> {
    let Query(query) = query?;
    let outcome = app
        .dispatch(correlation_id, |correlation_id| {
            GovernanceAction::RevokeUserGrants {
                correlation_id,
                user_name: query.user_name,
            }
        })
        .await?;

    match outcome {
        GovernanceAction::UserGrantsRevoked {
            user_name, removed, ..
        } => Ok(Success::json(
            format!("Removed {removed} access record(s) for {user_name}"),
            RevokedPayload { user_name, removed },
        )),
        other => Err(unexpected(&other)),
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Prometheus text exposition.
///
/// # Errors
///
/// 404 when this process owns no recorder.
#[allow(clippy::unused_async)]
pub async fn metrics(State(app): State<AppState>) -> WebResult<impl IntoResponse> {
    let body = app
        .metrics
        .render()
        .ok_or_else(|| AppError::not_found("Metrics are disabled"))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
