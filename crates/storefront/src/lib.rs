//! Promo Quote Storefront library.
//!
//! JSON API that resolves category pricing options, enforces method and zone
//! legality, computes quotes and accepts quote requests. Exposed as a library
//! so the router can be driven directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router with tracing middleware.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use promo_quote_core::pricing::{PricingCatalog, ScalingSteps};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        app_with_catalog(PricingCatalog::builtin().clone())
    }

    fn app_with_catalog(catalog: PricingCatalog) -> Router {
        app(AppState::new(StorefrontConfig::default(), catalog))
    }

    async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
        send_json(test_app(), uri, body).await
    }

    async fn send_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_pricing_for_category() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/pricing/gorras-personalizadas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["family"], "other");
        assert_eq!(json["allowedZones"], json!(["frontal", "espalda"]));
        assert_eq!(json["activeMethods"], json!(["DTF"]));
    }

    #[tokio::test]
    async fn test_quote_reference_scenario() {
        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "catalogPrice": "20,00 €",
                "quantities": {"M": 30, "L": 20},
                "zones": ["frontal", "espalda"],
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["method"], "DTF");
        assert_eq!(json["family"], "apparel");
        assert_eq!(json["totalQuantity"], 50);
        assert_eq!(json["appliedScalingMultiplier"], json!(3.69));
        assert_eq!(json["finalUnitPrice"], json!(40.0365));
        assert_eq!(json["meetsMinimum"], true);
        assert_eq!(json["formatted"]["totalWithTax"], "2422,21\u{a0}€");
    }

    #[tokio::test]
    async fn test_quote_rejects_inactive_method() {
        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "method": "BORDADO",
                "catalogPrice": 20,
                "quantities": {"M": 50},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("BORDADO"));
    }

    #[tokio::test]
    async fn test_quote_rejects_disallowed_zone() {
        let (status, _) = post_json(
            "/api/quote",
            &json!({
                "category": "llaveros-personalizados",
                "catalogPrice": 3,
                "quantities": {"Única": 100},
                "zones": ["espalda"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_quote_without_active_method() {
        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "mugs",
                "catalogPrice": 4,
                "quantities": {"Única": 100},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("no active printing method"));
    }

    #[tokio::test]
    async fn test_quote_rejects_bad_price() {
        let (status, _) = post_json(
            "/api/quote",
            &json!({"category": "t_shirts", "catalogPrice": "consultar"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quote_rejects_negative_price_text() {
        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "catalogPrice": "-20,00 €",
                "quantities": {"M": 50},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("negative"));
    }

    #[tokio::test]
    async fn test_quote_rejects_out_of_range_amounts() {
        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "catalogPrice": 1e20,
                "quantities": {"M": 50},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("catalog price"));

        let (status, json) = post_json(
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "catalogPrice": 20,
                "quantities": {"M": 4_000_000_000_u32},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("quantity"));
    }

    #[tokio::test]
    async fn test_quote_overflowing_catalog_is_internal_error() {
        let mut catalog = PricingCatalog::builtin().clone();
        catalog.formulas.apparel.scaling_steps = ScalingSteps::new([(1, Decimal::MAX)]).unwrap();

        let (status, json) = send_json(
            app_with_catalog(catalog),
            "/api/quote",
            &json!({
                "category": "t_shirts",
                "catalogPrice": 20,
                "quantities": {"M": 50},
                "zones": ["frontal"],
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
    }
}
