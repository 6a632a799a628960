//! Promo Quote Core - Pricing and quoting engine.
//!
//! This crate turns a product, a colour/size mix, a printing method and a set
//! of customization zones into a bindable price estimate. It is used by:
//! - `storefront` - JSON API consumed by the catalog and selection UI
//! - `cli` - Command-line quoting and catalog tooling
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no network, no
//! database, no filesystem access. Catalog documents are parsed from strings
//! supplied by the caller.
//!
//! # Modules
//!
//! - [`pricing`] - Method catalog, family tables, legality resolvers and the engine
//! - [`selection`] - Typed product variations and per-size quantity selection
//! - [`quote`] - Quote submission payload and its validation
//! - [`types`] - Money formatting/parsing and validated email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod quote;
pub mod selection;
pub mod types;

pub use pricing::{
    CatalogError, CategoryPricing, PriceQuote, PricingCatalog, PricingFamily,
    PricingFamilyFormula, PrintingMethod, PrintingMethodId, compute_quote,
    compute_quote_with_tax, resolve_scaling_multiplier,
};
pub use quote::{CustomerContact, QuoteReceipt, QuoteRequest, QuoteRequestError, QuotedProduct};
pub use selection::{QuantitySelection, Variation, ZoneSelection};
pub use types::*;
