//! Quote submission payload.
//!
//! What a customer sends when asking for a formal quote: contact details,
//! the configured product and the [`PriceQuote`] they were shown. The pricing
//! block's total quantity and zones must match the product block; the
//! amounts themselves are not recomputed here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::PriceQuote;
use crate::types::Email;

/// Reasons a quote request is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteRequestError {
    #[error("customer name is required")]
    MissingCustomerName,
    #[error("product id is required")]
    MissingProductId,
    #[error("product name is required")]
    MissingProductName,
    #[error("quoted quantity {quoted} does not match the {selected} units selected")]
    QuantityMismatch { quoted: u32, selected: u64 },
    #[error("quoted zones do not match the selected zones")]
    ZonesMismatch,
}

/// Who is asking for the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The product configuration being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotedProduct {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub image: String,
    pub selected_color: String,
    /// Units per size.
    pub quantities: BTreeMap<String, u32>,
    pub selected_zones: Vec<String>,
}

impl QuotedProduct {
    /// Units across every size.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.quantities.values().map(|units| u64::from(*units)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub customer: CustomerContact,
    pub product: QuotedProduct,
    pub pricing: PriceQuote,
}

impl QuoteRequest {
    /// Check the request is complete and internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), QuoteRequestError> {
        if self.customer.name.trim().is_empty() {
            return Err(QuoteRequestError::MissingCustomerName);
        }
        if self.product.id.trim().is_empty() {
            return Err(QuoteRequestError::MissingProductId);
        }
        if self.product.name.trim().is_empty() {
            return Err(QuoteRequestError::MissingProductName);
        }

        let selected = self.product.total_units();
        if u64::from(self.pricing.total_quantity) != selected {
            return Err(QuoteRequestError::QuantityMismatch {
                quoted: self.pricing.total_quantity,
                selected,
            });
        }
        if self.pricing.selected_zones != self.product.selected_zones {
            return Err(QuoteRequestError::ZonesMismatch);
        }
        Ok(())
    }
}

/// Acknowledgement returned once a request is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReceipt {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub message: String,
}

impl QuoteReceipt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
            message: "Presupuesto enviado correctamente".to_owned(),
        }
    }
}

impl Default for QuoteReceipt {
    fn default() -> Self {
        Self::new()
    }
}
