//! Integration tests for Promo Quote.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p promo-quote-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing_properties` - Engine and resolver properties across crates
//! - `catalog_documents` - YAML catalog loading and validation
//! - `storefront_api` - Storefront router driven in-process
//! - `quote_submission` - Quote request round trip through the API
//!
//! The storefront is exercised in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::BTreeMap;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use promo_quote_core::pricing::{PricingCatalog, PricingFamilyFormula, ScalingSteps};
use promo_quote_storefront::config::StorefrontConfig;
use promo_quote_storefront::state::AppState;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

/// Parse a decimal literal.
#[must_use]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// The `{25: 5.16, 50: 3.69, 100: 2.47}` step table.
#[must_use]
pub fn reference_steps() -> ScalingSteps {
    ScalingSteps::new([(25, dec("5.16")), (50, dec("3.69")), (100, dec("2.47"))]).unwrap()
}

/// Apparel-like formula with `frontal` and `espalda` zones.
#[must_use]
pub fn reference_formula() -> PricingFamilyFormula {
    PricingFamilyFormula {
        label: "Ropa Personalizada".to_string(),
        min_quantity: 25,
        scaling_steps: reference_steps(),
        zone_cost: BTreeMap::from([
            ("frontal".to_string(), dec("0.45")),
            ("espalda".to_string(), dec("0.40")),
        ]),
        zones_allowed: vec!["frontal".to_string(), "espalda".to_string()],
        notes: String::new(),
    }
}

/// Storefront router over a given catalog with default configuration.
#[must_use]
pub fn app_with(catalog: PricingCatalog) -> Router {
    promo_quote_storefront::app(AppState::new(StorefrontConfig::default(), catalog))
}

/// Storefront router over the built-in catalog.
#[must_use]
pub fn test_app() -> Router {
    app_with(PricingCatalog::builtin().clone())
}

/// Send a request and decode the JSON body (`Null` when not JSON).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// `GET` a path on the built-in storefront.
pub async fn get_json(uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(test_app(), request).await
}

/// `POST` a JSON body on the built-in storefront.
pub async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(test_app(), request).await
}
