//! Router configuration for the access governance API.

use crate::actions::GovernanceAction;
use crate::app::AppState;
use crate::environment::GovernanceEnvironment;
use crate::handlers;
use crate::reducer::GovernanceReducer;
use crate::state::GovernanceState;
use access_gov_web::correlation_id_layer;
use access_gov_web::handlers::{health_check, readiness_check};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the Axum router with every route and the shared state.
///
/// Routes only; see [`build_app`] for the middleware stack.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Authentication
        .route("/login", post(handlers::login))
        .route("/verify-otp", post(handlers::verify_otp))
        // Dashboards
        .route("/dashboard/stats", get(handlers::dashboard_stats))
        .route("/owners", get(handlers::list_owners))
        // Catalog
        .route(
            "/applications",
            get(handlers::list_applications).post(handlers::create_application),
        )
        // Approval chain
        .route(
            "/requests",
            get(handlers::list_requests).post(handlers::raise_request),
        )
        .route("/requests/:id/approve", post(handlers::approve_request))
        .route("/requests/:id/reject", post(handlers::reject_request))
        // Grants
        .route(
            "/users",
            get(handlers::list_grants).merge(delete(handlers::revoke_user_grants)),
        )
        .route(
            "/users/:id",
            put(handlers::update_grant).merge(delete(handlers::delete_grant)),
        );

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/health/ready",
            get(readiness_check::<
                GovernanceState,
                GovernanceAction,
                GovernanceEnvironment,
                GovernanceReducer,
            >),
        )
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api_routes)
        .with_state(state)
}

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    match allowed_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(error)) => {
            tracing::warn!(%error, "Ignoring unparsable CORS origin, allowing any");
            layer.allow_origin(Any)
        },
        None => layer.allow_origin(Any),
    }
}

/// Router wrapped in CORS, request tracing and correlation ids.
pub fn build_app(state: AppState, allowed_origin: Option<&str>) -> Router {
    build_router(state)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin))
}

