//! Governance metrics.

use metrics::{counter, describe_counter};

/// Describe the governance counters on the installed recorder.
pub fn describe() {
    describe_counter!(
        "governance_requests_total",
        "Governance commands handled, labelled by command and outcome"
    );
    describe_counter!(
        "governance_grants_created_total",
        "Access grants created by final approval"
    );
}

/// Governance metrics recorder.
pub struct GovernanceMetrics;

impl GovernanceMetrics {
    /// Record a handled command.
    pub fn record_command(command: &'static str, outcome: &'static str) {
        counter!("governance_requests_total", "command" => command, "outcome" => outcome)
            .increment(1);
    }

    /// Record a grant created by the approval chain.
    pub fn record_grant_created() {
        counter!("governance_grants_created_total").increment(1);
    }
}
