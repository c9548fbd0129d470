//! Axum integration for the access governance service.
//!
//! The web layer is the imperative shell around the reducer: it parses
//! requests, builds actions, sends them through the `Store`, and renders the
//! outcome.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** JSON body, role selector and correlation id
//! 3. **Build Action** carrying the correlation id
//! 4. **Dispatch** with `Store::send_and_wait_for`, matching on the correlation id
//! 5. **Map** the outcome (or [`AppError`]) to an HTTP response

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ApiJson, CorrelationId, RoleSelector};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
