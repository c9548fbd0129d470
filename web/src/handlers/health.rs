//! Health check endpoints.
//!
//! Used by load balancers and orchestrators to decide whether the process is
//! alive and whether its Store still accepts commands.

use access_gov_core::reducer::Reducer;
use access_gov_runtime::{HealthCheck, HealthStatus, Store};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;

/// Liveness probe.
///
/// ```text
/// GET /health  ->  200 {"status":"ok"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Readiness probe backed by the Store's own health check.
///
/// - 200 OK: Healthy or Degraded
/// - 503 Service Unavailable: Unhealthy (e.g. shutting down)
pub async fn readiness_check<S, A, E, R>(
    State(store): State<Arc<Store<S, A, E, R>>>,
) -> (StatusCode, Json<HealthCheck>)
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
    A: Send + Clone + 'static,
    E: Clone + Send + Sync + 'static,
{
    let health = store.health();

    let status = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(health))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use access_gov_core::{SmallVec, effect::Effect};
    use std::time::Duration;

    #[derive(Clone)]
    struct NoopReducer;

    impl Reducer for NoopReducer {
        type State = ();
        type Action = ();
        type Environment = ();

        fn reduce(
            &self,
            _state: &mut Self::State,
            _action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            SmallVec::new()
        }
    }

    #[tokio::test]
    async fn liveness_is_always_ok() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_store_shutdown() {
        let store = Arc::new(Store::new((), NoopReducer, ()));

        let (status, Json(health)) = readiness_check(State(Arc::clone(&store))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.status, HealthStatus::Healthy);

        store.shutdown(Duration::from_millis(10)).await.unwrap();
        let (status, _) = readiness_check(State(store)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
