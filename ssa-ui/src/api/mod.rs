//! HTTP API handlers for the UI module

pub mod actions;
pub mod health;
pub mod views;

pub use actions::{
    analyze, refresh_sites, reset_filters, reset_weights, select_site, update_filters,
    update_weights,
};
pub use health::health_routes;
pub use views::{get_config, get_sites, get_state, get_statistics};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use ssa_common::ClientError;

/// Error body returned by the UI surface
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Failure kind identifier
    pub error: &'static str,
    /// Human-readable message
    pub message: String,
}

/// Map a remote-call failure onto the UI surface
///
/// Identity misses stay 404; everything else is an upstream failure.
pub(crate) fn remote_failure(err: ClientError) -> Response {
    let (status, kind) = match &err {
        ClientError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        ClientError::Server(_, _) => (StatusCode::BAD_GATEWAY, "server"),
        ClientError::Transport(_) => (StatusCode::BAD_GATEWAY, "transport"),
    };

    (
        status,
        Json(ErrorResponse {
            error: kind,
            message: err.message(),
        }),
    )
        .into_response()
}
