//! Governance reducer.
//!
//! Every command is validated against the current store and either applied
//! in full or refused with a [`GovernanceError`], leaving the store untouched.
//! The reducer then emits exactly one outcome action carrying the command's
//! correlation id.

use crate::actions::{ApplicationDraft, GovernanceAction, RequestDraft};
use crate::environment::GovernanceEnvironment;
use crate::lifecycle;
use crate::metrics::GovernanceMetrics;
use crate::state::GovernanceState;
use access_gov_core::GovernanceError;
use access_gov_core::effect::Effect;
use access_gov_core::model::{
    AccessRequest, Application, ModuleSet, RequestKind, RequestStatus, RequestedAction,
    RoleCategory, UserAccessGrant,
};
use access_gov_core::reducer::Reducer;
use access_gov_core::{SmallVec, smallvec};
use uuid::Uuid;

/// Reducer implementing the governance rules
#[derive(Clone, Copy, Debug, Default)]
pub struct GovernanceReducer;

/// Trimmed value of a required text field.
fn required(value: Option<String>, message: &str) -> Result<String, GovernanceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| GovernanceError::missing(message))
}

fn optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl GovernanceReducer {
    /// Creates a new governance reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn command_name(action: &GovernanceAction) -> Option<&'static str> {
        match action {
            GovernanceAction::CreateApplication { .. } => Some("create_application"),
            GovernanceAction::RaiseRequest { .. } => Some("raise_request"),
            GovernanceAction::ApproveRequest { .. } => Some("approve_request"),
            GovernanceAction::RejectRequest { .. } => Some("reject_request"),
            GovernanceAction::UpdateGrantModules { .. } => Some("update_grant"),
            GovernanceAction::RevokeGrant { .. } => Some("revoke_grant"),
            GovernanceAction::RevokeUserGrants { .. } => Some("revoke_user_grants"),
            _ => None,
        }
    }

    fn create_application(
        state: &mut GovernanceState,
        draft: ApplicationDraft,
        env: &GovernanceEnvironment,
    ) -> Result<Application, GovernanceError> {
        let application_name = required(draft.application_name, "Application name is required")?;
        let application_owner_name =
            required(draft.application_owner_name, "Application owner is required")?;
        let business_owner_name =
            required(draft.business_owner_name, "Business owner is required")?;

        let application = Application {
            id: env.ids.next_id("APP"),
            application_name,
            user_count: 0,
            application_owner_name,
            business_owner_name,
            pending_requests_count: 0,
            last_review_date: env.clock.now().date_naive(),
            modules: draft.modules,
            category: draft.category.unwrap_or_default(),
        };

        tracing::info!(
            application_id = %application.id,
            category = ?application.category,
            "Application created"
        );
        state.applications.push(application.clone());
        Ok(application)
    }

    fn raise_request(
        state: &mut GovernanceState,
        draft: RequestDraft,
        env: &GovernanceEnvironment,
    ) -> Result<AccessRequest, GovernanceError> {
        let user_name = required(draft.user_name, "User name is required")?;
        let application_name = required(draft.application_name, "Application name is required")?;

        let request = AccessRequest {
            id: env.ids.next_id("REQ"),
            user_name,
            user_email: optional(draft.user_email).unwrap_or_default(),
            employee_id: optional(draft.employee_id),
            department: optional(draft.department),
            role: lifecycle::GRANT_ROLE.to_string(),
            application_name,
            modules: draft.modules,
            requested_action: RequestedAction::AccessRequest,
            reporting_manager_name: None,
            application_owner_name: None,
            submitted_date: env.clock.now(),
            status: RequestStatus::PendingAppOwner,
            kind: RequestKind::AccessRequest,
            initiated_by: Some(RoleCategory::Manager),
        };

        tracing::info!(request_id = %request.id, application = %request.application_name, "Access request raised");
        state.requests.push(request.clone());
        Ok(request)
    }

    fn approve_request(
        state: &mut GovernanceState,
        correlation_id: Uuid,
        request_id: &str,
        env: &GovernanceEnvironment,
    ) -> Result<GovernanceAction, GovernanceError> {
        let request = state
            .request_mut(request_id)
            .ok_or_else(|| GovernanceError::not_found("Request", request_id))?;

        let transition = lifecycle::approve(request, env.policy)?;
        request.status = transition.to;
        let request = request.clone();

        let grant = transition
            .grants_access
            .then(|| lifecycle::grant_for(&request, env.ids.next_id("USR")));
        if let Some(grant) = &grant {
            tracing::info!(grant_id = %grant.id, user = %grant.user_name, "Access granted");
            state.grants.push(grant.clone());
            GovernanceMetrics::record_grant_created();
        }

        tracing::info!(request_id, status = %request.status, "Request approved");
        Ok(GovernanceAction::RequestAdvanced {
            correlation_id,
            request,
            grant,
            message: transition.message,
        })
    }

    fn reject_request(
        state: &mut GovernanceState,
        request_id: &str,
        env: &GovernanceEnvironment,
    ) -> Result<AccessRequest, GovernanceError> {
        let request = state
            .request_mut(request_id)
            .ok_or_else(|| GovernanceError::not_found("Request", request_id))?;

        let transition = lifecycle::reject(request, env.policy)?;
        request.status = transition.to;

        tracing::info!(request_id, "Request rejected");
        Ok(request.clone())
    }

    fn update_grant(
        state: &mut GovernanceState,
        grant_id: &str,
        modules: ModuleSet,
    ) -> Result<UserAccessGrant, GovernanceError> {
        let grant = state
            .grant_mut(grant_id)
            .ok_or_else(|| GovernanceError::not_found("User", grant_id))?;
        grant.modules = modules;

        tracing::info!(grant_id, modules = grant.modules.len(), "Grant modules replaced");
        Ok(grant.clone())
    }
}

impl Reducer for GovernanceReducer {
    type State = GovernanceState;
    type Action = GovernanceAction;
    type Environment = GovernanceEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let correlation_id = action.correlation_id();
        let Some(command) = Self::command_name(&action) else {
            // Outcomes were applied when their command ran
            tracing::trace!(%correlation_id, "Outcome observed");
            return SmallVec::new();
        };

        let result = match action {
            GovernanceAction::CreateApplication { draft, .. } => {
                Self::create_application(state, draft, env).map(|application| {
                    GovernanceAction::ApplicationCreated {
                        correlation_id,
                        application,
                    }
                })
            },
            GovernanceAction::RaiseRequest { draft, .. } => Self::raise_request(state, draft, env)
                .map(|request| GovernanceAction::RequestRaised {
                    correlation_id,
                    request,
                }),
            GovernanceAction::ApproveRequest { request_id, .. } => {
                Self::approve_request(state, correlation_id, &request_id, env)
            },
            GovernanceAction::RejectRequest { request_id, .. } => {
                Self::reject_request(state, &request_id, env).map(|request| {
                    GovernanceAction::RequestRejected {
                        correlation_id,
                        request,
                    }
                })
            },
            GovernanceAction::UpdateGrantModules {
                grant_id, modules, ..
            } => Self::update_grant(state, &grant_id, modules).map(|grant| {
                GovernanceAction::GrantModulesUpdated {
                    correlation_id,
                    grant,
                }
            }),
            GovernanceAction::RevokeGrant { grant_id, .. } => state
                .remove_grant(&grant_id)
                .map(|grant| {
                    tracing::info!(grant_id = %grant.id, "Grant revoked");
                    GovernanceAction::GrantRevoked {
                        correlation_id,
                        grant,
                    }
                })
                .ok_or_else(|| GovernanceError::not_found("User", grant_id)),
            GovernanceAction::RevokeUserGrants { user_name, .. } => {
                // Matched verbatim: a padded name is a different user name.
                user_name
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| GovernanceError::missing("userName is required"))
                    .map(|user_name| {
                        let removed = state.remove_grants_of(&user_name);
                        tracing::info!(user = %user_name, removed, "User grants revoked");
                        GovernanceAction::UserGrantsRevoked {
                            correlation_id,
                            user_name,
                            removed,
                        }
                    })
            },
            _ => return SmallVec::new(),
        };

        let outcome = match result {
            Ok(outcome) => {
                GovernanceMetrics::record_command(command, "ok");
                outcome
            },
            Err(error) => {
                tracing::warn!(%correlation_id, command, %error, "Command refused");
                GovernanceMetrics::record_command(command, "refused");
                GovernanceAction::CommandFailed {
                    correlation_id,
                    error,
                }
            },
        };

        smallvec![Effect::emit(outcome)]
    }
}
