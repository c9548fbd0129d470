//! Dependencies injected into the reducer.

use access_gov_core::environment::{Clock, ClockIdGenerator, IdGenerator, SystemClock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How approve/reject treat requests that already reached a decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalPolicy {
    /// Approve on a decided request sets it to `approved` again; reject
    /// always succeeds. Matches what the existing dashboards rely on.
    #[default]
    Legacy,
    /// Approve and reject on `approved` or `rejected` requests are refused.
    Strict,
}

/// Returned when `APPROVAL_POLICY` names no known policy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown approval policy '{0}' (expected 'legacy' or 'strict')")]
pub struct UnknownPolicy(pub String);

impl FromStr for ApprovalPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ApprovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Environment of the governance reducer.
#[derive(Clone)]
pub struct GovernanceEnvironment {
    /// Time source for submission timestamps and review dates
    pub clock: Arc<dyn Clock>,
    /// Record identifier source
    pub ids: Arc<dyn IdGenerator>,
    /// Terminal-state policy
    pub policy: ApprovalPolicy,
}

impl GovernanceEnvironment {
    /// Environment with explicit dependencies
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>, policy: ApprovalPolicy) -> Self {
        Self { clock, ids, policy }
    }

    /// Wall clock with clock-derived monotonic ids
    #[must_use]
    pub fn production(policy: ApprovalPolicy) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids = Arc::new(ClockIdGenerator::new(Arc::clone(&clock)));
        Self::new(clock, ids, policy)
    }
}

impl fmt::Debug for GovernanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernanceEnvironment")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_parsing_is_case_insensitive() {
        assert_eq!("STRICT".parse(), Ok(ApprovalPolicy::Strict));
        assert_eq!(" legacy ".parse(), Ok(ApprovalPolicy::Legacy));
        assert!("lenient".parse::<ApprovalPolicy>().is_err());
    }

    #[test]
    fn production_ids_carry_prefix() {
        let env = GovernanceEnvironment::production(ApprovalPolicy::default());
        let first = env.ids.next_id("REQ");
        let second = env.ids.next_id("REQ");
        assert!(first.starts_with("REQ-"));
        assert_ne!(first, second);
    }
}
