//! Pricing route handlers.
//!
//! These handlers are the engine's caller: they resolve the category, check
//! method and zone legality, and only then compute a quote.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use promo_quote_core::pricing::{
    CategoryPricing, PriceQuote, PricingFamily, PrintingMethodId, SelectionError,
};
use promo_quote_core::types::{format_euro, parse_catalog_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Catalog price as a JSON number or a currency string (`"20,00 €"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogPrice {
    Amount(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Text(String),
}

impl CatalogPrice {
    /// The price as a non-negative decimal.
    ///
    /// # Errors
    ///
    /// Returns `AppError` for unparseable text or a negative amount.
    pub fn resolve(&self) -> Result<Decimal> {
        let price = match self {
            Self::Amount(amount) => *amount,
            Self::Text(text) => parse_catalog_price(text)?,
        };
        if price < Decimal::ZERO {
            return Err(AppError::BadRequest("catalog price cannot be negative".to_string()));
        }
        Ok(price)
    }
}

/// Body of `POST /api/quote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    pub category: String,
    /// Printing method; the category's first active method when omitted.
    #[serde(default)]
    pub method: Option<PrintingMethodId>,
    pub catalog_price: CatalogPrice,
    /// Units per size.
    #[serde(default)]
    pub quantities: BTreeMap<String, u32>,
    #[serde(default)]
    pub zones: Vec<String>,
}

/// Display strings for the main money fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAmounts {
    pub final_unit_price: String,
    pub total_before_tax: String,
    pub total_with_tax: String,
}

/// Response of `POST /api/quote`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub category: String,
    pub family: PricingFamily,
    pub method: PrintingMethodId,
    #[serde(flatten)]
    pub quote: PriceQuote,
    /// Minimum the policy sets for the chosen method.
    pub method_minimum_quantity: u32,
    pub units_to_minimum: u32,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_discount_percent: Option<Decimal>,
    pub formatted: FormattedAmounts,
}

/// Resolved pricing options for a category.
///
/// GET /api/pricing/{category}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<CategoryPricing> {
    let pricing = state.category_pricing(&category).await;
    Json(CategoryPricing::clone(&pricing))
}

/// Compute a price breakdown for a selection.
///
/// POST /api/quote
#[instrument(skip(state, body), fields(category = %body.category, method = ?body.method))]
pub async fn quote(
    State(state): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<QuoteResponse>> {
    let catalog_price = body.catalog_price.resolve()?;
    let quantity = total_quantity(&body.quantities)?;

    let pricing = state.category_pricing(&body.category).await;
    let method = body
        .method
        .or_else(|| pricing.default_method())
        .ok_or_else(|| SelectionError::NoActiveMethod {
            category: body.category.clone(),
        })?;

    let quote = pricing.checked_quote(
        Some(method),
        catalog_price,
        quantity,
        &body.zones,
        state.tax_rate(),
    )?;

    tracing::info!(
        family = %pricing.family,
        quantity,
        meets_minimum = quote.meets_minimum,
        "Quote computed"
    );

    Ok(Json(QuoteResponse {
        category: body.category,
        family: pricing.family,
        method,
        method_minimum_quantity: pricing
            .min_quantity_by_method
            .get(&method)
            .copied()
            .unwrap_or(1),
        units_to_minimum: quote.units_to_minimum(),
        volume_discount_percent: quote.volume_discount_percent(),
        formatted: FormattedAmounts {
            final_unit_price: format_euro(quote.final_unit_price),
            total_before_tax: format_euro(quote.total_before_tax),
            total_with_tax: format_euro(quote.total_with_tax),
        },
        quote,
    }))
}

fn total_quantity(quantities: &BTreeMap<String, u32>) -> Result<u32> {
    let total: u64 = quantities.values().map(|units| u64::from(*units)).sum();
    u32::try_from(total).map_err(|_| AppError::BadRequest("quantity is too large".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_price_number_or_text() {
        let body: QuoteBody = serde_json::from_value(serde_json::json!({
            "category": "t_shirts",
            "catalogPrice": 20,
        }))
        .unwrap();
        assert_eq!(body.catalog_price.resolve().unwrap(), Decimal::from(20));
        assert!(body.method.is_none());
        assert!(body.zones.is_empty());

        let body: QuoteBody = serde_json::from_value(serde_json::json!({
            "category": "t_shirts",
            "method": "DTF",
            "catalogPrice": "1.234,56 €",
        }))
        .unwrap();
        assert_eq!(body.catalog_price.resolve().unwrap(), Decimal::new(123_456, 2));
        assert_eq!(body.method, Some(PrintingMethodId::Dtf));
    }

    #[test]
    fn test_catalog_price_rejects_garbage_and_negative() {
        assert!(matches!(
            CatalogPrice::Text("consultar".to_string()).resolve(),
            Err(AppError::InvalidPrice(_))
        ));
        assert!(matches!(
            CatalogPrice::Amount(Decimal::new(-5, 0)).resolve(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_total_quantity() {
        let quantities = BTreeMap::from([("S".to_string(), 20), ("M".to_string(), 30)]);
        assert_eq!(total_quantity(&quantities).unwrap(), 50);
        assert_eq!(total_quantity(&BTreeMap::new()).unwrap(), 0);

        let huge = BTreeMap::from([("S".to_string(), u32::MAX), ("M".to_string(), 1)]);
        assert!(total_quantity(&huge).is_err());
    }
}
