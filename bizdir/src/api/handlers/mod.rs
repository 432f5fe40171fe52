//! HTTP request handlers for all API endpoints.
//!
//! Handlers are thin: they extract and validate input, run the integrity checks and id
//! allocation in a fixed order, call the repositories and shape the JSON response. Errors
//! are returned as [`crate::errors::Error`] and rendered by its `IntoResponse` impl.
//!
//! - [`businesses`]: `/businesses`
//! - [`reviews`]: `/reviews`
//! - [`photos`]: `/photos`
//! - [`users`]: `/users/{userid}/*`

pub mod businesses;
pub mod photos;
pub mod reviews;
pub mod users;

use axum::{Json, http::StatusCode, http::Uri};

use crate::errors::ErrorBody;

/// Fallback for requests that match no route
pub async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or_else(|| uri.path());
    tracing::debug!(%path, "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: format!("Requested resource {path} does not exist"),
        }),
    )
}

/// Liveness probe
#[utoipa::path(get, path = "/healthz", tag = "health", responses((status = 200, description = "Service is up", body = String)))]
pub async fn healthz() -> &'static str {
    "OK"
}
