//! The record store.

use access_gov_core::model::{AccessRequest, Application, UserAccessGrant};

/// All records held by the service, each collection in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GovernanceState {
    /// Application catalog
    pub applications: Vec<Application>,
    /// Access requests, including decided ones
    pub requests: Vec<AccessRequest>,
    /// Current access grants
    pub grants: Vec<UserAccessGrant>,
}

impl GovernanceState {
    /// Empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applications: Vec::new(),
            requests: Vec::new(),
            grants: Vec::new(),
        }
    }

    /// Look up a request by id
    #[must_use]
    pub fn request(&self, id: &str) -> Option<&AccessRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub(crate) fn request_mut(&mut self, id: &str) -> Option<&mut AccessRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }

    /// Look up a grant by id
    #[must_use]
    pub fn grant(&self, id: &str) -> Option<&UserAccessGrant> {
        self.grants.iter().find(|g| g.id == id)
    }

    pub(crate) fn grant_mut(&mut self, id: &str) -> Option<&mut UserAccessGrant> {
        self.grants.iter_mut().find(|g| g.id == id)
    }

    /// Remove a grant by id, returning it
    pub(crate) fn remove_grant(&mut self, id: &str) -> Option<UserAccessGrant> {
        let index = self.grants.iter().position(|g| g.id == id)?;
        Some(self.grants.remove(index))
    }

    /// Remove every grant held by exactly `user_name`, returning how many went
    pub(crate) fn remove_grants_of(&mut self, user_name: &str) -> usize {
        let before = self.grants.len();
        self.grants.retain(|g| g.user_name != user_name);
        before - self.grants.len()
    }
}
