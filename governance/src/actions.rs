//! Actions understood by the governance reducer.
//!
//! Commands are what the dashboards ask for. Each carries a correlation id,
//! and the reducer answers every command with exactly one outcome action
//! carrying the same id.

use access_gov_core::GovernanceError;
use access_gov_core::model::{
    AccessRequest, Application, ApplicationCategory, ModuleSet, UserAccessGrant,
};
use serde::Deserialize;
use uuid::Uuid;

/// Input for adding an application to the catalog.
///
/// Owner names are optional here so that a missing field is reported as a
/// domain error rather than a JSON parse failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    /// Display name
    pub application_name: Option<String>,
    /// Application owner
    #[serde(alias = "owner")]
    pub application_owner_name: Option<String>,
    /// Business owner
    #[serde(alias = "businessOwner")]
    pub business_owner_name: Option<String>,
    /// Grantable modules
    #[serde(default)]
    pub modules: ModuleSet,
    /// Dashboard category, `team` when absent
    pub category: Option<ApplicationCategory>,
}

/// Input for raising a two-step access request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    /// User who needs access
    pub user_name: Option<String>,
    /// That user's email
    pub user_email: Option<String>,
    /// Employee number
    pub employee_id: Option<String>,
    /// Department
    pub department: Option<String>,
    /// Target application
    pub application_name: Option<String>,
    /// Requested modules
    pub modules: Option<ModuleSet>,
}

/// Governance actions
#[derive(Clone, Debug, PartialEq)]
pub enum GovernanceAction {
    // Commands
    /// Add an application to the catalog
    CreateApplication {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Application fields
        draft: ApplicationDraft,
    },
    /// Raise an access request on behalf of a reporting manager
    RaiseRequest {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Request fields
        draft: RequestDraft,
    },
    /// Approve the current step of a request
    ApproveRequest {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Request to approve
        request_id: String,
    },
    /// Reject a request
    RejectRequest {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Request to reject
        request_id: String,
    },
    /// Replace the module set of a grant
    UpdateGrantModules {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Grant to update
        grant_id: String,
        /// New module set
        modules: ModuleSet,
    },
    /// Delete one grant
    RevokeGrant {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Grant to delete
        grant_id: String,
    },
    /// Delete every grant held by a user
    RevokeUserGrants {
        /// Correlates the command with its outcome
        correlation_id: Uuid,
        /// Exact user name to match
        user_name: Option<String>,
    },

    // Outcomes
    /// Application was added
    ApplicationCreated {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The stored record
        application: Application,
    },
    /// Request was stored at `pending_app_owner`
    RequestRaised {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The stored record
        request: AccessRequest,
    },
    /// Request moved forward in the approval chain
    RequestAdvanced {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The request after the transition
        request: AccessRequest,
        /// Grant created by the final approval, if any
        grant: Option<UserAccessGrant>,
        /// Human-readable description of the step taken
        message: &'static str,
    },
    /// Request was rejected
    RequestRejected {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The request after rejection
        request: AccessRequest,
    },
    /// Grant modules were replaced
    GrantModulesUpdated {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The grant after the update
        grant: UserAccessGrant,
    },
    /// One grant was deleted
    GrantRevoked {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// The deleted record
        grant: UserAccessGrant,
    },
    /// Every grant of a user was deleted
    UserGrantsRevoked {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// User whose grants were removed
        user_name: String,
        /// Number of grants removed
        removed: usize,
    },
    /// The command was refused; the store is unchanged
    CommandFailed {
        /// Correlation id of the command
        correlation_id: Uuid,
        /// Why it was refused
        error: GovernanceError,
    },
}

impl GovernanceAction {
    /// Correlation id carried by this action
    #[must_use]
    pub const fn correlation_id(&self) -> Uuid {
        match self {
            Self::CreateApplication { correlation_id, .. }
            | Self::RaiseRequest { correlation_id, .. }
            | Self::ApproveRequest { correlation_id, .. }
            | Self::RejectRequest { correlation_id, .. }
            | Self::UpdateGrantModules { correlation_id, .. }
            | Self::RevokeGrant { correlation_id, .. }
            | Self::RevokeUserGrants { correlation_id, .. }
            | Self::ApplicationCreated { correlation_id, .. }
            | Self::RequestRaised { correlation_id, .. }
            | Self::RequestAdvanced { correlation_id, .. }
            | Self::RequestRejected { correlation_id, .. }
            | Self::GrantModulesUpdated { correlation_id, .. }
            | Self::GrantRevoked { correlation_id, .. }
            | Self::UserGrantsRevoked { correlation_id, .. }
            | Self::CommandFailed { correlation_id, .. } => *correlation_id,
        }
    }

    /// Whether this action reports the result of a command
    #[must_use]
    pub const fn is_outcome(&self) -> bool {
        matches!(
            self,
            Self::ApplicationCreated { .. }
                | Self::RequestRaised { .. }
                | Self::RequestAdvanced { .. }
                | Self::RequestRejected { .. }
                | Self::GrantModulesUpdated { .. }
                | Self::GrantRevoked { .. }
                | Self::UserGrantsRevoked { .. }
                | Self::CommandFailed { .. }
        )
    }

    /// Whether this is the outcome of the command tagged `correlation_id`
    #[must_use]
    pub fn answers(&self, correlation_id: Uuid) -> bool {
        self.is_outcome() && self.correlation_id() == correlation_id
    }
}
