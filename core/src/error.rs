//! Typed failures of governance operations.
//!
//! Every mutating operation returns `Result<_, GovernanceError>`. The web layer
//! maps each variant onto a status code while keeping the flat
//! `success`/`message` body the dashboards already read.

use crate::model::RequestStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the lifecycle engine, the catalog and the mock login.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceError {
    /// A required input field was absent or blank.
    #[error("{0}")]
    MissingField(String),

    /// An input was present but unusable.
    #[error("{0}")]
    Validation(String),

    /// Username/password pair rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// One-time code rejected.
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Credentials were fine but the username maps to no role.
    #[error("User not found")]
    UnknownUser,

    /// The addressed record does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human label of the record kind ("Request", "User access")
        resource: String,
        /// Identifier that was looked up
        id: String,
    },

    /// The request is in a state that refuses the attempted transition.
    #[error("Request {id} is already {status}")]
    InvalidTransition {
        /// Request identifier
        id: String,
        /// Status the request is locked in
        status: RequestStatus,
    },
}

impl GovernanceError {
    /// Shorthand for a missing-field error.
    #[must_use]
    pub fn missing(message: impl Into<String>) -> Self {
        Self::MissingField(message.into())
    }

    /// Shorthand for a not-found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Whether the caller, not the server, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::Validation(_))
    }

    /// Whether the failure is an authentication rejection.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidOtp | Self::UnknownUser
        )
    }
}
