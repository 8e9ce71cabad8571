// Downstream handlers sitting behind the gate.
//
// Public (no credential) → Pages (gate checked role, caller in extensions)
// → Api (gate forwarded x-user-* identity headers)
pub mod api;
pub mod pages;
pub mod public;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::not_found("Not found")
}
