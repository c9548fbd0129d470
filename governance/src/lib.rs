//! Access governance service.
//!
//! Reporting managers raise access requests, application owners and then
//! business owners approve them, and administrators curate the application
//! catalog. Final approval of a request materializes a user access grant.
//!
//! # Architecture
//!
//! 1. **Commands** (`RaiseRequest`, `ApproveRequest`, ...) carry a correlation id
//! 2. **Reducer** validates each command against the record store and applies
//!    it in full or refuses it
//! 3. **Outcome** actions (`RequestAdvanced`, `CommandFailed`, ...) answer the
//!    command with the same correlation id
//! 4. **Handlers** wait for that outcome with `send_and_wait_for()`
//!
//! Listings and dashboard statistics are pure functions over the store
//! ([`queries`], [`stats`]) and never go through the reducer.
//!
//! # Example Usage
//!
//! ```no_run
//! use access_gov::{
//!     GovernanceAction, GovernanceEnvironment, GovernanceReducer, GovernanceState,
//!     environment::ApprovalPolicy,
//! };
//! use access_gov_runtime::Store;
//! use std::time::Duration;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(
//!     access_gov::seed::demo_state(),
//!     GovernanceReducer::new(),
//!     GovernanceEnvironment::production(ApprovalPolicy::Legacy),
//! );
//!
//! let id = Uuid::new_v4();
//! let outcome = store
//!     .send_and_wait_for(
//!         GovernanceAction::RejectRequest {
//!             correlation_id: id,
//!             request_id: "REQ-1000".to_string(),
//!         },
//!         |a| a.answers(id),
//!         Duration::from_secs(5),
//!     )
//!     .await?;
//! assert!(matches!(outcome, GovernanceAction::RequestRejected { .. }));
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod app;
pub mod auth;
pub mod config;
pub mod environment;
pub mod handlers;
pub mod lifecycle;
pub mod metrics;
pub mod queries;
pub mod reducer;
pub mod router;
pub mod seed;
pub mod state;
pub mod stats;

pub use actions::GovernanceAction;
pub use app::{AppState, GovernanceStore};
pub use config::Config;
pub use environment::GovernanceEnvironment;
pub use reducer::GovernanceReducer;
pub use router::{build_app, build_router};
pub use state::GovernanceState;
