//! # Access Governance Testing
//!
//! Testing utilities for the access governance service.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - A Given-When-Then harness for reducers
//! - Record fixtures with sensible defaults
//! - proptest strategies for domain types
//!
//! ## Example
//!
//! ```ignore
//! use access_gov_testing::{fixtures, test_clock, SequentialIdGenerator};
//!
//! let env = GovernanceEnvironment::new(
//!     Arc::new(test_clock()),
//!     Arc::new(SequentialIdGenerator::new()),
//!     ApprovalPolicy::Legacy,
//! );
//! let request = fixtures::access_request("REQ-1").status(RequestStatus::Pending).build();
//! ```

use access_gov_core::environment::{Clock, IdGenerator};
use chrono::{DateTime, Utc};

pub mod fixtures;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use access_gov_testing::mocks::FixedClock;
    /// use access_gov_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable identifiers: `REQ-1`, `USR-2`, `APP-3`, ...
    ///
    /// One counter is shared by every prefix.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Generator whose first id ends in `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self, prefix: &str) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{prefix}-{n}")
        }
    }
}

/// proptest strategies for domain types
pub mod properties {
    use access_gov_core::model::{ModuleSet, RequestStatus};
    use proptest::prelude::*;

    /// Any request status
    pub fn request_status() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::Pending),
            Just(RequestStatus::PendingAppOwner),
            Just(RequestStatus::PendingBusinessOwner),
            Just(RequestStatus::Approved),
            Just(RequestStatus::Rejected),
        ]
    }

    /// Statuses that have not reached the end of the chain
    pub fn open_status() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::Pending),
            Just(RequestStatus::PendingAppOwner),
            Just(RequestStatus::PendingBusinessOwner),
        ]
    }

    /// Small module sets drawn from a fixed vocabulary
    pub fn module_set() -> impl Strategy<Value = ModuleSet> {
        proptest::collection::vec(
            prop_oneof![
                Just("Board"),
                Just("Wiki"),
                Just("Reports"),
                Just("Billing"),
                Just("Admin"),
            ],
            0..5,
        )
        .prop_map(|names| names.into_iter().collect())
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
