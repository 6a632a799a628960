//! The bundled pricing configuration and its legality resolvers.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::builtin;
use super::engine::{
    MAX_CATALOG_PRICE, MAX_QUANTITY, PriceQuote, QuoteOverflowError, try_compute_quote_with_tax,
};
use super::family::{ClassificationTable, FamilyTable, PricingFamily};
use super::formula::PricingFamilyFormula;
use super::method::{MethodCatalog, PrintingMethod, PrintingMethodId};
use super::policy::FamilyPrintingPolicy;
use super::zones::OverrideTable;

static BUILTIN: LazyLock<PricingCatalog> = LazyLock::new(builtin::catalog);

/// Errors loading a catalog document.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("catalog document is malformed: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog is invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Reasons a caller must not price a selection.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("category {category} has no active printing method")]
    NoActiveMethod { category: String },
    #[error("printing method {method} is not available for category {category}")]
    MethodNotActive {
        category: String,
        method: PrintingMethodId,
    },
    #[error("zone {zone} is not allowed for category {category}")]
    ZoneNotAllowed { category: String, zone: String },
}

/// Reasons [`CategoryPricing::checked_quote`] refuses to price.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("catalog price must be between 0 and {MAX_CATALOG_PRICE}, got {0}")]
    PriceOutOfRange(Decimal),
    #[error("quantity must be at most {MAX_QUANTITY}, got {0}")]
    QuantityOutOfRange(u32),
    /// The inputs were in range but the catalog's figures overflowed.
    #[error(transparent)]
    Overflow(#[from] QuoteOverflowError),
}

/// Method registry, classification map, family policies, category overrides
/// and family formulas, treated as one immutable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCatalog {
    pub methods: MethodCatalog,
    pub categories: ClassificationTable,
    pub policies: FamilyTable<FamilyPrintingPolicy>,
    #[serde(default)]
    pub overrides: OverrideTable,
    pub formulas: FamilyTable<PricingFamilyFormula>,
}

impl PricingCatalog {
    /// The production catalog compiled into the binary.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse and validate a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed YAML or unknown ids and
    /// [`CatalogError::Invalid`] listing every consistency problem found.
    #[instrument(skip(document), fields(bytes = document.len()))]
    pub fn from_yaml(document: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(document)?;
        catalog.validated()
    }

    /// Render the catalog as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Validate and return the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if [`Self::validate`] finds problems.
    pub fn validated(self) -> Result<Self, CatalogError> {
        for (family, policy) in self.policies.iter() {
            for method in policy.methods_missing_minimum() {
                tracing::warn!(
                    %family,
                    %method,
                    "No minimum quantity configured; falling back to 1"
                );
            }
        }

        let problems = self.validate();
        if problems.is_empty() {
            tracing::info!(
                methods = self.methods.iter().count(),
                categories = self.categories.len(),
                overrides = self.overrides.len(),
                "Pricing catalog loaded"
            );
            Ok(self)
        } else {
            Err(CatalogError::Invalid(problems))
        }
    }

    /// Check cross-table consistency. Returns an empty list when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.methods.problems();

        for (family, policy) in self.policies.iter() {
            problems.extend(policy.problems(family));
            for method in &policy.methods {
                if self.methods.get(*method).is_none() {
                    problems.push(format!(
                        "family {family}: method {method} is not in the method catalog"
                    ));
                }
            }
        }

        for (family, formula) in self.formulas.iter() {
            problems.extend(formula.problems(family));
        }

        for (category, record) in self.overrides.sorted() {
            if record.allowed_zones.is_empty() {
                problems.push(format!("override {category}: allowedZones is empty"));
            }
            for method in record.allowed_methods.iter().flatten() {
                if self.methods.get(*method).is_none() {
                    problems.push(format!(
                        "override {category}: method {method} is not in the method catalog"
                    ));
                }
            }
        }

        problems
    }

    /// Pricing family of a category; unknown ids get the catch-all family.
    #[must_use]
    pub fn resolve_family(&self, category: &str) -> PricingFamily {
        self.categories.resolve(category)
    }

    #[must_use]
    pub const fn policy(&self, family: PricingFamily) -> &FamilyPrintingPolicy {
        self.policies.get(family)
    }

    #[must_use]
    pub const fn formula(&self, family: PricingFamily) -> &PricingFamilyFormula {
        self.formulas.get(family)
    }

    /// Formula of the family the category resolves to.
    #[must_use]
    pub fn formula_for(&self, category: &str) -> &PricingFamilyFormula {
        self.formula(self.resolve_family(category))
    }

    /// Method ids legal for a category: the override's list when it sets one,
    /// otherwise the family's.
    #[must_use]
    pub fn allowed_method_ids(&self, category: &str) -> &[PrintingMethodId] {
        self.overrides
            .get(category)
            .and_then(|record| record.allowed_methods.as_deref())
            .unwrap_or_else(|| self.policy(self.resolve_family(category)).methods.as_slice())
    }

    /// Methods legal for a category, including inactive ones.
    #[must_use]
    pub fn allowed_methods(&self, category: &str) -> Vec<&PrintingMethod> {
        self.allowed_method_ids(category)
            .iter()
            .filter_map(|id| self.methods.get(*id))
            .collect()
    }

    /// Legal methods that are also globally active.
    #[must_use]
    pub fn active_methods(&self, category: &str) -> Vec<&PrintingMethod> {
        self.allowed_methods(category)
            .into_iter()
            .filter(|method| method.is_active)
            .collect()
    }

    /// Zones legal for a category. An override replaces the family list.
    #[must_use]
    pub fn allowed_zones(&self, category: &str) -> &[String] {
        self.overrides.get(category).map_or_else(
            || self.formula_for(category).zones_allowed.as_slice(),
            |record| record.allowed_zones.as_slice(),
        )
    }

    /// Minimum order quantity for a method in the category's family.
    #[must_use]
    pub fn minimum_quantity(&self, category: &str, method: PrintingMethodId) -> u32 {
        self.policy(self.resolve_family(category))
            .minimum_quantity(method)
    }

    /// Resolve everything a caller needs to price products of a category.
    #[must_use]
    #[instrument(skip(self))]
    pub fn category_pricing(&self, category: &str) -> CategoryPricing {
        let family = self.resolve_family(category);
        let allowed_methods: Vec<PrintingMethod> =
            self.allowed_methods(category).into_iter().cloned().collect();
        let active_methods: Vec<PrintingMethodId> = allowed_methods
            .iter()
            .filter(|method| method.is_active)
            .map(|method| method.id)
            .collect();
        let min_quantity_by_method = allowed_methods
            .iter()
            .map(|method| (method.id, self.minimum_quantity(category, method.id)))
            .collect();

        tracing::debug!(%family, active = active_methods.len(), "Resolved category pricing");

        CategoryPricing {
            category: category.to_owned(),
            family,
            allowed_methods,
            active_methods,
            allowed_zones: self.allowed_zones(category).to_vec(),
            min_quantity_by_method,
            formula: self.formula(family).clone(),
        }
    }
}

/// Resolved pricing options for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPricing {
    pub category: String,
    pub family: PricingFamily,
    /// Every legal method, with display metadata; inactive ones are "coming soon".
    pub allowed_methods: Vec<PrintingMethod>,
    /// Ids of the methods a customer may select today.
    pub active_methods: Vec<PrintingMethodId>,
    pub allowed_zones: Vec<String>,
    pub min_quantity_by_method: BTreeMap<PrintingMethodId, u32>,
    pub formula: PricingFamilyFormula,
}

impl CategoryPricing {
    /// Method preselected in a fresh selection: the first active one.
    #[must_use]
    pub fn default_method(&self) -> Option<PrintingMethodId> {
        self.active_methods.first().copied()
    }

    /// Zone preselected in a fresh selection: the first legal one.
    #[must_use]
    pub fn default_zone(&self) -> Option<&str> {
        self.allowed_zones.first().map(String::as_str)
    }

    #[must_use]
    pub fn is_method_active(&self, method: PrintingMethodId) -> bool {
        self.active_methods.contains(&method)
    }

    #[must_use]
    pub fn is_zone_allowed(&self, zone: &str) -> bool {
        self.allowed_zones.iter().any(|allowed| allowed == zone)
    }

    /// Price a selection after checking input ranges and method and zone
    /// legality.
    ///
    /// When `method` is `None` the default method is used.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::PriceOutOfRange`] or
    /// [`QuoteError::QuantityOutOfRange`] for inputs outside
    /// `0..=MAX_CATALOG_PRICE` and `0..=MAX_QUANTITY`, a
    /// [`QuoteError::Selection`] when the category has no active method, the
    /// method is not active for it, or a zone is not allowed, and
    /// [`QuoteError::Overflow`] if the formula's figures overflow.
    pub fn checked_quote<S: AsRef<str>>(
        &self,
        method: Option<PrintingMethodId>,
        catalog_price: Decimal,
        quantity: u32,
        zones: &[S],
        tax_rate: Decimal,
    ) -> Result<PriceQuote, QuoteError> {
        if catalog_price < Decimal::ZERO || catalog_price > MAX_CATALOG_PRICE {
            return Err(QuoteError::PriceOutOfRange(catalog_price));
        }
        if quantity > MAX_QUANTITY {
            return Err(QuoteError::QuantityOutOfRange(quantity));
        }

        let Some(method) = method.or_else(|| self.default_method()) else {
            return Err(SelectionError::NoActiveMethod {
                category: self.category.clone(),
            }
            .into());
        };
        if !self.is_method_active(method) {
            return Err(SelectionError::MethodNotActive {
                category: self.category.clone(),
                method,
            }
            .into());
        }
        if let Some(zone) = zones.iter().find(|zone| !self.is_zone_allowed(zone.as_ref())) {
            return Err(SelectionError::ZoneNotAllowed {
                category: self.category.clone(),
                zone: zone.as_ref().to_owned(),
            }
            .into());
        }

        Ok(try_compute_quote_with_tax(
            catalog_price,
            quantity,
            zones,
            &self.formula,
            tax_rate,
        )?)
    }
}
