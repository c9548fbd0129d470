//! Application state shared by the HTTP handlers.

use crate::actions::GovernanceAction;
use crate::auth::AuthConfig;
use crate::config::Config;
use crate::environment::GovernanceEnvironment;
use crate::reducer::GovernanceReducer;
use crate::seed;
use crate::state::GovernanceState;
use access_gov_runtime::Store;
use access_gov_runtime::metrics::MetricsExporter;
use access_gov_web::AppError;
use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The governance store.
pub type GovernanceStore =
    Store<GovernanceState, GovernanceAction, GovernanceEnvironment, GovernanceReducer>;

/// State handed to every handler. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Owner of the record store
    pub store: Arc<GovernanceStore>,
    /// Mock login credentials
    pub auth: Arc<AuthConfig>,
    /// How long a handler waits for its command's outcome
    pub request_timeout: Duration,
    /// Prometheus exposition
    pub metrics: MetricsExporter,
}

impl AppState {
    /// Create application state around an existing store.
    #[must_use]
    pub fn new(
        store: Arc<GovernanceStore>,
        auth: AuthConfig,
        request_timeout: Duration,
        metrics: MetricsExporter,
    ) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
            request_timeout,
            metrics,
        }
    }

    /// Build the store and state described by `config`.
    #[must_use]
    pub fn from_config(config: &Config, metrics: MetricsExporter) -> Self {
        let initial = if config.store.seed_demo_data {
            seed::demo_state()
        } else {
            GovernanceState::new()
        };
        tracing::info!(
            applications = initial.applications.len(),
            requests = initial.requests.len(),
            grants = initial.grants.len(),
            policy = %config.store.approval_policy,
            "Record store initialized"
        );

        let store = Store::with_broadcast_capacity(
            initial,
            GovernanceReducer::new(),
            GovernanceEnvironment::production(config.store.approval_policy),
            config.store.broadcast_capacity,
        );

        Self::new(
            Arc::new(store),
            config.auth.clone(),
            config.request_timeout(),
            metrics,
        )
    }

    /// Send the command built by `command` and wait for its outcome.
    ///
    /// `correlation_id` comes from the caller and only labels logs. The
    /// command itself is tagged with a fresh id, so two requests sharing a
    /// header value still wait on their own outcomes.
    ///
    /// # Errors
    ///
    /// - The command's [`GovernanceError`](access_gov_core::GovernanceError)
    ///   when the reducer refused it
    /// - Timeout or shutdown errors from the store
    pub async fn dispatch(
        &self,
        correlation_id: Uuid,
        command: impl FnOnce(Uuid) -> GovernanceAction,
    ) -> Result<GovernanceAction, AppError> {
        let command_id = Uuid::new_v4();
        tracing::debug!(%correlation_id, %command_id, "Dispatching command");

        let outcome = self
            .store
            .send_and_wait_for(
                command(command_id),
                |action| action.answers(command_id),
                self.request_timeout,
            )
            .await?;

        match outcome {
            GovernanceAction::CommandFailed { error, .. } => Err(error.into()),
            outcome => Ok(outcome),
        }
    }
}

impl FromRef<AppState> for Arc<GovernanceStore> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.store)
    }
}
