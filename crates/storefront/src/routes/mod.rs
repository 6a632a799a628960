//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Pricing
//! GET  /api/pricing/{category}  - Resolved pricing options for a category
//! POST /api/quote               - Compute a price breakdown
//!
//! # Quote requests
//! POST /api/quote-requests      - Validate and acknowledge a quote request
//! ```

pub mod pricing;
pub mod quote;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the pricing API router.
pub fn pricing_routes() -> Router<AppState> {
    Router::new()
        .route("/pricing/{category}", get(pricing::show))
        .route("/quote", post(pricing::quote))
        .route("/quote-requests", post(quote::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", pricing_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
pub async fn health() -> &'static str {
    "ok"
}
