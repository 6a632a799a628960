//! Quote request submission.
//!
//! Delivery (email to the sales team) happens downstream; this endpoint
//! validates the request and hands back a reference the customer can quote.

use axum::{Json, http::StatusCode};
use promo_quote_core::quote::{QuoteReceipt, QuoteRequest};
use tracing::instrument;

use crate::error::Result;

/// Validate and acknowledge a quote request.
///
/// POST /api/quote-requests
#[instrument(
    skip(request),
    fields(product = %request.product.id, email_domain = %request.customer.email.domain())
)]
pub async fn submit(
    Json(request): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<QuoteReceipt>)> {
    request.validate()?;

    let receipt = QuoteReceipt::new();
    tracing::info!(
        reference = %receipt.reference,
        quantity = request.pricing.total_quantity,
        meets_minimum = request.pricing.meets_minimum,
        "Quote request received"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}
