//! The approval chain.
//!
//! ```text
//! pending_app_owner ──approve──▶ pending_business_owner ──approve──▶ approved (+ grant)
//!        │                               │
//!        └────────reject────────┬────────┘
//!                               ▼
//!                            rejected
//!
//! pending ──approve──▶ approved (single step, no grant)
//! ```
//!
//! Functions here decide transitions without touching the store; the reducer
//! applies them.

use crate::environment::ApprovalPolicy;
use access_gov_core::GovernanceError;
use access_gov_core::model::{AccessRequest, RequestStatus, UserAccessGrant};

/// Message for the first approval step.
pub const APP_OWNER_APPROVED: &str =
    "Approved by Application Owner. Pending Business Owner approval.";
/// Message for the final approval step.
pub const BUSINESS_OWNER_APPROVED: &str = "Approved by Business Owner. Access granted.";
/// Message for single-step approval.
pub const APPROVED: &str = "Request approved";
/// Message for rejection.
pub const REJECTED: &str = "Request rejected";

/// Role label given to grants created by the approval chain.
pub const GRANT_ROLE: &str = "User";

/// A decided status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Status after the change
    pub to: RequestStatus,
    /// Whether the change materializes a grant
    pub grants_access: bool,
    /// Human-readable description
    pub message: &'static str,
}

fn refuse_terminal(request: &AccessRequest, policy: ApprovalPolicy) -> Result<(), GovernanceError> {
    if policy == ApprovalPolicy::Strict && request.status.is_terminal() {
        return Err(GovernanceError::InvalidTransition {
            id: request.id.clone(),
            status: request.status,
        });
    }
    Ok(())
}

/// Decide what approving `request` does.
///
/// # Errors
///
/// [`GovernanceError::InvalidTransition`] under [`ApprovalPolicy::Strict`]
/// when the request is already approved or rejected.
pub fn approve(request: &AccessRequest, policy: ApprovalPolicy) -> Result<Transition, GovernanceError> {
    refuse_terminal(request, policy)?;

    Ok(match request.status {
        RequestStatus::PendingAppOwner => Transition {
            to: RequestStatus::PendingBusinessOwner,
            grants_access: false,
            message: APP_OWNER_APPROVED,
        },
        RequestStatus::PendingBusinessOwner => Transition {
            to: RequestStatus::Approved,
            grants_access: true,
            message: BUSINESS_OWNER_APPROVED,
        },
        RequestStatus::Pending | RequestStatus::Approved | RequestStatus::Rejected => Transition {
            to: RequestStatus::Approved,
            grants_access: false,
            message: APPROVED,
        },
    })
}

/// Decide what rejecting `request` does.
///
/// # Errors
///
/// [`GovernanceError::InvalidTransition`] under [`ApprovalPolicy::Strict`]
/// when the request is already approved or rejected.
pub fn reject(request: &AccessRequest, policy: ApprovalPolicy) -> Result<Transition, GovernanceError> {
    refuse_terminal(request, policy)?;

    Ok(Transition {
        to: RequestStatus::Rejected,
        grants_access: false,
        message: REJECTED,
    })
}

/// The grant materialized by the final approval of `request`.
#[must_use]
pub fn grant_for(request: &AccessRequest, id: String) -> UserAccessGrant {
    UserAccessGrant {
        id,
        user_name: request.user_name.clone(),
        application_name: request.application_name.clone(),
        modules: request.modules.clone().unwrap_or_default(),
        role: GRANT_ROLE.to_string(),
    }
}
