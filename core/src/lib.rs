//! # Access Governance Core
//!
//! Domain model and the functional-core abstractions of the access governance
//! service.
//!
//! ## Core Concepts
//!
//! - **State**: the record store (applications, access requests, grants)
//! - **Action**: commands raised by dashboards and the outcomes they produce
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of follow-up work, executed by the runtime
//! - **Environment**: clock and id generation, injected via traits
//!
//! ## Example
//!
//! ```ignore
//! use access_gov_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for GovernanceReducer {
//!     type State = GovernanceState;
//!     type Action = GovernanceAction;
//!     type Environment = GovernanceEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut GovernanceState,
//!         action: GovernanceAction,
//!         env: &GovernanceEnvironment,
//!     ) -> SmallVec<[Effect<GovernanceAction>; 4]> {
//!         // Lifecycle rules go here
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod error;
pub mod model;

pub use error::GovernanceError;

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// All lifecycle rules of the service live behind this trait so they can be
/// exercised without HTTP or a runtime.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The record store this reducer mutates
    /// - `Action`: The command/outcome type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Validates the action, updates state in place and returns effect
        /// descriptions for the runtime to execute.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned from reducers. The runtime executes them and
/// feeds any resulting action back through the reducer.
pub mod effect {
    use futures::future::{self, BoxFuture, FutureExt};

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the
        /// reducer and broadcast to observers.
        Future(BoxFuture<'static, Option<Action>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action: Send + 'static> Effect<Action> {
        /// Feed an already-known action back through the runtime.
        ///
        /// Used by reducers to publish the outcome of a command so that
        /// request-response callers waiting on the action broadcast see it.
        #[must_use]
        pub fn emit(action: Action) -> Self {
            Effect::Future(future::ready(Some(action)).boxed())
        }
    }
}

/// Environment module - dependency injection traits
///
/// All non-deterministic inputs of the reducer (time, identifiers) are
/// abstracted behind traits so tests can pin them.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Issues record identifiers such as `REQ-1700000000000`.
    pub trait IdGenerator: Send + Sync {
        /// Produce the next identifier with the given prefix.
        fn next_id(&self, prefix: &str) -> String;
    }

    /// Identifier generator derived from clock readings in milliseconds.
    ///
    /// Readings are forced to be strictly increasing, so two ids issued in the
    /// same millisecond (or after the clock steps backwards) never collide.
    pub struct ClockIdGenerator {
        clock: Arc<dyn Clock>,
        last: AtomicI64,
    }

    impl ClockIdGenerator {
        /// Creates a generator reading from `clock`
        #[must_use]
        pub fn new(clock: Arc<dyn Clock>) -> Self {
            Self {
                clock,
                last: AtomicI64::new(i64::MIN),
            }
        }

        fn next_tick(&self) -> i64 {
            let now = self.clock.now().timestamp_millis();
            let mut last = self.last.load(Ordering::Acquire);
            loop {
                let candidate = if now > last { now } else { last + 1 };
                match self.last.compare_exchange_weak(
                    last,
                    candidate,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return candidate,
                    Err(observed) => last = observed,
                }
            }
        }
    }

    impl IdGenerator for ClockIdGenerator {
        fn next_id(&self, prefix: &str) -> String {
            format!("{prefix}-{}", self.next_tick())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, ClockIdGenerator, IdGenerator};
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::Arc;

    struct Frozen(DateTime<Utc>);

    impl Clock for Frozen {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn ids_within_same_millisecond_stay_unique() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ids = ClockIdGenerator::new(Arc::new(Frozen(at)));

        let issued: HashSet<String> = (0..50).map(|_| ids.next_id("REQ")).collect();
        assert_eq!(issued.len(), 50);

        let first = ClockIdGenerator::new(Arc::new(Frozen(at))).next_id("REQ");
        assert_eq!(first, format!("REQ-{}", at.timestamp_millis()));
    }

    #[test]
    fn emit_yields_the_action() {
        let effect = Effect::emit(7_u32);
        let Effect::Future(fut) = effect else {
            panic!("emit must produce a future effect");
        };
        assert_eq!(futures::executor::block_on(fut), Some(7));
    }
}
