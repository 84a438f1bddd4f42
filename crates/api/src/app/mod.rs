//! Application wiring.
//!
//! - `services`: service container handed to handlers as an extension
//! - `dto`: request payloads and query-string shapes
//! - `errors`: error-to-response mapping
//! - `routes`: per-domain routers

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{Extension, Router, middleware::from_fn_with_state, routing::get};

use jobboard_auth::TokenValidator;

use crate::middleware::{AuthState, auth_middleware};
use services::AppServices;

/// Build the router: an open `/health` probe plus the authenticated API.
pub fn build_app(services: Arc<AppServices>, validator: Arc<dyn TokenValidator>) -> Router {
    let auth_state = AuthState { validator };

    let protected = routes::router()
        .layer(Extension(services))
        .layer(from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
}
