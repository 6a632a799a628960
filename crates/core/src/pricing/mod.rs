//! Pricing and quoting engine.
//!
//! Control flow for a quote, leaf-first:
//!
//! ```text
//! category ──► family ──► method legality ──► zone legality ──► formula ──► engine
//!          (classification) (policy+override) (formula+override)          (compute_quote)
//! ```
//!
//! The lookup tables live in a [`PricingCatalog`]. The engine functions in
//! [`engine`] never look anything up; they take a fully resolved
//! [`PricingFamilyFormula`].
//!
//! The free functions in this module answer legality questions against the
//! built-in catalog. Use the methods on [`PricingCatalog`] directly when a
//! catalog has been loaded from a document instead.

pub mod builtin;
pub mod catalog;
pub mod engine;
pub mod family;
pub mod formula;
pub mod method;
pub mod policy;
pub mod zones;

pub use catalog::{CatalogError, CategoryPricing, PricingCatalog, QuoteError, SelectionError};
pub use engine::{
    DEFAULT_TAX_RATE, MAX_CATALOG_PRICE, MAX_QUANTITY, PriceQuote, QuoteOverflowError,
    compute_quote, compute_quote_with_tax, from_unit_price, resolve_scaling_multiplier,
    try_compute_quote_with_tax,
};
pub use family::{ClassificationTable, FamilyTable, PricingFamily};
pub use formula::{PricingFamilyFormula, ScalingSteps, ScalingStepsError};
pub use method::{
    MethodCatalog, PricingStrategy, PrintingMethod, PrintingMethodId, UnknownMethodError,
};
pub use policy::FamilyPrintingPolicy;
pub use zones::{CategoryZoneOverride, OverrideTable};

/// Resolve the pricing family of a catalog category in the built-in catalog.
///
/// Unregistered and empty category ids resolve to [`PricingFamily::Other`].
#[must_use]
pub fn resolve_family(category: &str) -> PricingFamily {
    PricingCatalog::builtin().resolve_family(category)
}

/// Printing methods allowed for a category in the built-in catalog.
#[must_use]
pub fn allowed_methods(category: &str) -> Vec<&'static PrintingMethod> {
    PricingCatalog::builtin().allowed_methods(category)
}

/// Allowed printing methods that are also globally active.
#[must_use]
pub fn active_methods(category: &str) -> Vec<&'static PrintingMethod> {
    PricingCatalog::builtin().active_methods(category)
}

/// Customization zones legal for a category in the built-in catalog.
#[must_use]
pub fn allowed_zones(category: &str) -> &'static [String] {
    PricingCatalog::builtin().allowed_zones(category)
}

/// Minimum order quantity for a method within a category's family.
#[must_use]
pub fn minimum_quantity(category: &str, method: PrintingMethodId) -> u32 {
    PricingCatalog::builtin().minimum_quantity(category, method)
}
