//! Custom Axum extractors.
//!
//! - `CorrelationId`: the id the middleware assigned, or a fresh one
//! - `RoleSelector`: the optional `?role=` dashboard selector
//! - `ApiJson`: a JSON body whose rejections render as [`AppError`]
//!
//! # Examples
//!
//! ```ignore
//! async fn list_requests(
//!     State(state): State<AppState>,
//!     RoleSelector(role): RoleSelector,
//! ) -> Json<Vec<AccessRequest>> {
//!     Json(state.store.state(|s| queries::requests_for(s, role)).await)
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use access_gov_core::model::RoleCategory;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Reads the id stored by [`crate::middleware::correlation_id_layer`], falls
/// back to the `X-Correlation-ID` header, and generates a UUID v4 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[derive(Debug, Deserialize)]
struct RoleQuery {
    role: Option<String>,
}

/// Dashboard role selector from the `role` query parameter.
///
/// Missing and unrecognized selectors both yield `None`; callers decide what
/// "no role" means for their listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSelector(pub Option<RoleCategory>);

#[async_trait]
impl<S> FromRequestParts<S> for RoleSelector
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RoleQuery>::from_request_parts(parts, state).await?;

        let role = match query.role.as_deref() {
            None | Some("") => None,
            Some(raw) => match raw.parse::<RoleCategory>() {
                Ok(role) => Some(role),
                Err(unknown) => {
                    tracing::debug!(%unknown, "Ignoring role selector");
                    None
                },
            },
        };

        Ok(Self(role))
    }
}

/// JSON body extractor whose rejections use the service's error body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
