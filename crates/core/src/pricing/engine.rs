//! Quote computation.
//!
//! Pure functions over a resolved [`PricingFamilyFormula`]. Nothing here
//! fails: zero quantity, zero price and an empty zone list all produce
//! zero-valued fields, and a quantity below the formula minimum yields a fully
//! computed quote flagged with `meets_minimum = false`.
//!
//! # Algorithm
//!
//! ```text
//! unit_base_price         = catalog_price / 2
//! unit_customization_cost = Σ zone_cost[z] for z in selected_zones   (duplicates count twice)
//! multiplier              = step(quantity, scaling_steps)
//! final_unit_price        = (unit_base_price + unit_customization_cost) × multiplier
//! total_before_tax        = final_unit_price × quantity
//! total_with_tax          = total_before_tax × (1 + tax_rate)
//! ```
//!
//! The halving of the catalog price is a fixed business rule: the catalog
//! lists a retail-equivalent price and production is modeled at half of it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::formula::{PricingFamilyFormula, ScalingSteps};

/// Spanish VAT applied when no rate is given (21%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

const CATALOG_PRICE_DIVISOR: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Highest catalog price a caller should accept (1,000,000 €).
pub const MAX_CATALOG_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Highest total quantity a caller should accept.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// An intermediate amount left the range of [`Decimal`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("quote amounts exceed the representable range")]
pub struct QuoteOverflowError;

/// Full price breakdown for one product configuration.
///
/// Field names (camelCase on the wire) are the contract with the quote
/// submission channel. Money fields serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_customization_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_before_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_with_tax: Decimal,
    pub total_quantity: u32,
    pub minimum_quantity: u32,
    pub meets_minimum: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub applied_scaling_multiplier: Decimal,
    pub selected_zones: Vec<String>,
}

impl PriceQuote {
    /// Unit cost before the volume multiplier.
    #[must_use]
    pub fn combined_unit_cost(&self) -> Decimal {
        self.unit_base_price + self.unit_customization_cost
    }

    /// Units still needed to reach the minimum order quantity.
    #[must_use]
    pub const fn units_to_minimum(&self) -> u32 {
        self.minimum_quantity.saturating_sub(self.total_quantity)
    }

    /// Whole-percent discount advertised when the multiplier drops below 1.
    #[must_use]
    pub fn volume_discount_percent(&self) -> Option<Decimal> {
        (self.applied_scaling_multiplier < Decimal::ONE).then(|| {
            ((Decimal::ONE - self.applied_scaling_multiplier) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        })
    }
}

/// Resolve the volume multiplier for a quantity.
///
/// Returns the multiplier of the greatest threshold not above `quantity`.
/// Below the lowest threshold the lowest tier's multiplier applies (the least
/// favourable rate); above the highest threshold the highest tier applies.
///
/// # Examples
///
/// ```
/// use promo_quote_core::pricing::{ScalingSteps, resolve_scaling_multiplier};
/// use rust_decimal::Decimal;
///
/// let steps = ScalingSteps::new([
///     (25, Decimal::new(516, 2)),
///     (50, Decimal::new(369, 2)),
///     (100, Decimal::new(247, 2)),
/// ])
/// .unwrap();
///
/// assert_eq!(resolve_scaling_multiplier(10, &steps), Decimal::new(516, 2));
/// assert_eq!(resolve_scaling_multiplier(75, &steps), Decimal::new(369, 2));
/// assert_eq!(resolve_scaling_multiplier(1000, &steps), Decimal::new(247, 2));
/// ```
#[must_use]
pub fn resolve_scaling_multiplier(quantity: u32, steps: &ScalingSteps) -> Decimal {
    let steps = steps.as_map();
    steps
        .range(..=quantity)
        .next_back()
        .or_else(|| steps.first_key_value())
        .map_or(Decimal::ONE, |(_, multiplier)| *multiplier)
}

/// Compute a quote at the default 21% tax rate.
///
/// See [`compute_quote_with_tax`].
#[must_use]
pub fn compute_quote<S: AsRef<str>>(
    catalog_price: Decimal,
    quantity: u32,
    selected_zones: &[S],
    formula: &PricingFamilyFormula,
) -> PriceQuote {
    compute_quote_with_tax(catalog_price, quantity, selected_zones, formula, DEFAULT_TAX_RATE)
}

/// Compute a full price breakdown.
///
/// `quantity` is the total across all sizes and variants. Zones missing from
/// the formula's cost table contribute nothing; repeated zones are charged
/// each time they appear. The zone list is echoed back unchanged.
///
/// # Panics
///
/// Panics if an amount overflows [`Decimal`]. Callers handling untrusted
/// input use [`try_compute_quote_with_tax`].
#[must_use]
pub fn compute_quote_with_tax<S: AsRef<str>>(
    catalog_price: Decimal,
    quantity: u32,
    selected_zones: &[S],
    formula: &PricingFamilyFormula,
    tax_rate: Decimal,
) -> PriceQuote {
    let unit_base_price = catalog_price / CATALOG_PRICE_DIVISOR;
    let unit_customization_cost: Decimal = selected_zones
        .iter()
        .map(|zone| formula.zone_cost(zone.as_ref()))
        .sum();

    let combined_unit_cost = unit_base_price + unit_customization_cost;
    let multiplier = resolve_scaling_multiplier(quantity, &formula.scaling_steps);

    let final_unit_price = combined_unit_cost * multiplier;
    let total_before_tax = final_unit_price * Decimal::from(quantity);
    let total_with_tax = total_before_tax * (Decimal::ONE + tax_rate);

    PriceQuote {
        unit_base_price,
        unit_customization_cost,
        final_unit_price,
        total_before_tax,
        total_with_tax,
        total_quantity: quantity,
        minimum_quantity: formula.min_quantity,
        meets_minimum: quantity >= formula.min_quantity,
        applied_scaling_multiplier: multiplier,
        selected_zones: selected_zones
            .iter()
            .map(|zone| zone.as_ref().to_owned())
            .collect(),
    }
}

/// [`compute_quote_with_tax`] with checked arithmetic.
///
/// # Errors
///
/// Returns [`QuoteOverflowError`] if any amount overflows [`Decimal`].
pub fn try_compute_quote_with_tax<S: AsRef<str>>(
    catalog_price: Decimal,
    quantity: u32,
    selected_zones: &[S],
    formula: &PricingFamilyFormula,
    tax_rate: Decimal,
) -> Result<PriceQuote, QuoteOverflowError> {
    let unit_base_price = catalog_price
        .checked_div(CATALOG_PRICE_DIVISOR)
        .ok_or(QuoteOverflowError)?;
    let unit_customization_cost = selected_zones
        .iter()
        .try_fold(Decimal::ZERO, |sum, zone| {
            sum.checked_add(formula.zone_cost(zone.as_ref()))
        })
        .ok_or(QuoteOverflowError)?;

    let multiplier = resolve_scaling_multiplier(quantity, &formula.scaling_steps);
    let final_unit_price = unit_base_price
        .checked_add(unit_customization_cost)
        .and_then(|combined| combined.checked_mul(multiplier))
        .ok_or(QuoteOverflowError)?;
    let total_before_tax = final_unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(QuoteOverflowError)?;
    let total_with_tax = Decimal::ONE
        .checked_add(tax_rate)
        .and_then(|factor| total_before_tax.checked_mul(factor))
        .ok_or(QuoteOverflowError)?;

    Ok(PriceQuote {
        unit_base_price,
        unit_customization_cost,
        final_unit_price,
        total_before_tax,
        total_with_tax,
        total_quantity: quantity,
        minimum_quantity: formula.min_quantity,
        meets_minimum: quantity >= formula.min_quantity,
        applied_scaling_multiplier: multiplier,
        selected_zones: selected_zones
            .iter()
            .map(|zone| zone.as_ref().to_owned())
            .collect(),
    })
}

/// Lowest advertised unit price ("from €X/unit") for a product.
///
/// Prices the product at the highest configured threshold with no zones.
#[must_use]
pub fn from_unit_price(catalog_price: Decimal, formula: &PricingFamilyFormula) -> Decimal {
    let no_zones: &[&str] = &[];
    compute_quote(
        catalog_price,
        formula.scaling_steps.highest_threshold(),
        no_zones,
        formula,
    )
    .final_unit_price
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn steps() -> ScalingSteps {
        ScalingSteps::new([(25, dec("5.16")), (50, dec("3.69")), (100, dec("2.47"))]).unwrap()
    }

    fn formula() -> PricingFamilyFormula {
        PricingFamilyFormula {
            label: "Ropa Personalizada".to_string(),
            min_quantity: 25,
            scaling_steps: steps(),
            zone_cost: BTreeMap::from([
                ("frontal".to_string(), dec("0.45")),
                ("espalda".to_string(), dec("0.40")),
            ]),
            zones_allowed: vec!["frontal".to_string(), "espalda".to_string()],
            notes: String::new(),
        }
    }

    #[test]
    fn test_multiplier_step_boundaries() {
        let steps = steps();
        assert_eq!(resolve_scaling_multiplier(10, &steps), dec("5.16"));
        assert_eq!(resolve_scaling_multiplier(25, &steps), dec("5.16"));
        assert_eq!(resolve_scaling_multiplier(49, &steps), dec("5.16"));
        assert_eq!(resolve_scaling_multiplier(50, &steps), dec("3.69"));
        assert_eq!(resolve_scaling_multiplier(75, &steps), dec("3.69"));
        assert_eq!(resolve_scaling_multiplier(100, &steps), dec("2.47"));
        assert_eq!(resolve_scaling_multiplier(1000, &steps), dec("2.47"));
    }

    #[test]
    fn test_multiplier_zero_quantity_clamps_to_lowest_tier() {
        assert_eq!(resolve_scaling_multiplier(0, &steps()), dec("5.16"));
    }

    #[test]
    fn test_quote_reference_scenario() {
        let quote = compute_quote(dec("20"), 50, &["frontal", "espalda"], &formula());

        assert_eq!(quote.unit_base_price, dec("10"));
        assert_eq!(quote.unit_customization_cost, dec("0.85"));
        assert_eq!(quote.combined_unit_cost(), dec("10.85"));
        assert_eq!(quote.applied_scaling_multiplier, dec("3.69"));
        assert_eq!(quote.final_unit_price, dec("40.0365"));
        assert_eq!(quote.total_before_tax, dec("2001.825"));
        assert_eq!(quote.total_with_tax, dec("2422.20825"));
        assert_eq!(quote.total_quantity, 50);
        assert_eq!(quote.minimum_quantity, 25);
        assert!(quote.meets_minimum);
        assert_eq!(quote.selected_zones, vec!["frontal", "espalda"]);
    }

    #[test]
    fn test_quote_below_minimum_is_still_populated() {
        let quote = compute_quote(dec("20"), 10, &["frontal"], &formula());

        assert!(!quote.meets_minimum);
        assert_eq!(quote.minimum_quantity, 25);
        assert_eq!(quote.units_to_minimum(), 15);
        assert_eq!(quote.applied_scaling_multiplier, dec("5.16"));
        assert_eq!(quote.final_unit_price, dec("10.45") * dec("5.16"));
        assert_eq!(quote.total_before_tax, quote.final_unit_price * dec("10"));
    }

    #[test]
    fn test_quote_zero_quantity_has_zero_totals() {
        let quote = compute_quote(dec("99.90"), 0, &["frontal", "espalda"], &formula());
        assert_eq!(quote.total_before_tax, Decimal::ZERO);
        assert_eq!(quote.total_with_tax, Decimal::ZERO);
        assert!(!quote.meets_minimum);
    }

    #[test]
    fn test_quote_empty_zones_has_no_customization_cost() {
        let no_zones: &[&str] = &[];
        let quote = compute_quote(dec("20"), 100, no_zones, &formula());
        assert_eq!(quote.unit_customization_cost, Decimal::ZERO);
        assert_eq!(quote.final_unit_price, dec("24.70"));
        assert!(quote.selected_zones.is_empty());
    }

    #[test]
    fn test_quote_duplicate_and_unknown_zones() {
        let quote = compute_quote(
            dec("0"),
            50,
            &["frontal", "frontal", "manga_izquierda"],
            &formula(),
        );
        assert_eq!(quote.unit_customization_cost, dec("0.90"));
        assert_eq!(quote.selected_zones, vec!["frontal", "frontal", "manga_izquierda"]);
    }

    #[test]
    fn test_quote_custom_tax_rate() {
        let quote = compute_quote_with_tax(dec("20"), 50, &["frontal"], &formula(), Decimal::ZERO);
        assert_eq!(quote.total_with_tax, quote.total_before_tax);
    }

    #[test]
    fn test_checked_quote_matches_unchecked() {
        let zones = ["frontal", "espalda", "manga"];
        for quantity in [0, 10, 50, 1000] {
            let checked = try_compute_quote_with_tax(
                dec("20"),
                quantity,
                &zones,
                &formula(),
                DEFAULT_TAX_RATE,
            );
            assert_eq!(checked, Ok(compute_quote(dec("20"), quantity, &zones, &formula())));
        }
    }

    #[test]
    fn test_checked_quote_reports_overflow() {
        let no_zones: &[&str] = &[];
        let huge = Decimal::from_scientific("1e20").unwrap();
        let overflowed = try_compute_quote_with_tax(
            huge,
            4_000_000_000,
            no_zones,
            &formula(),
            DEFAULT_TAX_RATE,
        );
        assert_eq!(overflowed, Err(QuoteOverflowError));

        let overflowed =
            try_compute_quote_with_tax(Decimal::MAX, 1, &["frontal"], &formula(), DEFAULT_TAX_RATE);
        assert_eq!(overflowed, Err(QuoteOverflowError));

        let limit = try_compute_quote_with_tax(
            MAX_CATALOG_PRICE,
            MAX_QUANTITY,
            &["frontal", "espalda"],
            &formula(),
            Decimal::ONE,
        );
        assert!(limit.is_ok());
    }

    #[test]
    fn test_volume_discount_percent() {
        let mut quote = compute_quote(dec("20"), 50, &["frontal"], &formula());
        assert_eq!(quote.volume_discount_percent(), None);

        quote.applied_scaling_multiplier = dec("0.89");
        assert_eq!(quote.volume_discount_percent(), Some(dec("11")));
    }

    #[test]
    fn test_from_unit_price_uses_highest_tier() {
        assert_eq!(from_unit_price(dec("20"), &formula()), dec("24.70"));
    }

    #[test]
    fn test_serializes_contract_field_names() {
        let quote = compute_quote(dec("20"), 50, &["frontal", "espalda"], &formula());
        let json = serde_json::to_value(&quote).unwrap();

        assert_eq!(json["unitBasePrice"], serde_json::json!(10.0));
        assert_eq!(json["finalUnitPrice"], serde_json::json!(40.0365));
        assert_eq!(json["appliedScalingMultiplier"], serde_json::json!(3.69));
        assert_eq!(json["totalQuantity"], serde_json::json!(50));
        assert_eq!(json["meetsMinimum"], serde_json::json!(true));
        assert_eq!(json["selectedZones"], serde_json::json!(["frontal", "espalda"]));

        let back: PriceQuote = serde_json::from_value(json).unwrap();
        assert_eq!(back, quote);
    }
}
