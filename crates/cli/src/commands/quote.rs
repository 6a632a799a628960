//! Quoting and category option commands.
//!
//! # Usage
//!
//! ```bash
//! pq-cli quote t_shirts --price "20,00 €" --qty M=30 --qty L=20 --zone frontal --zone espalda
//! pq-cli quote mochilas --price 12 --qty 100 --json
//! pq-cli options camisetas-personalizadas
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

use promo_quote_core::pricing::{PricingCatalog, PrintingMethodId, SelectionError};
use promo_quote_core::selection::{ONE_SIZE, ZoneSelection};
use promo_quote_core::types::{format_euro, parse_catalog_price};
use rust_decimal::Decimal;

use super::CommandError;

/// Units for one size, given as `SIZE=N` or a bare `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeQuantity {
    pub size: String,
    pub units: u32,
}

impl FromStr for SizeQuantity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, units) = match s.split_once('=') {
            Some((size, units)) => (size.trim(), units),
            None => (ONE_SIZE, s),
        };
        if size.is_empty() {
            return Err(format!("missing size in {s:?}"));
        }
        let units = units
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid units in {s:?}: {e}"))?;
        Ok(Self {
            size: size.to_owned(),
            units,
        })
    }
}

/// Arguments of `pq-cli quote`.
#[derive(Debug, Clone)]
pub struct QuoteArgs {
    pub category: String,
    pub price: String,
    pub quantities: Vec<SizeQuantity>,
    pub zones: Vec<String>,
    pub method: Option<PrintingMethodId>,
    pub tax_rate: Decimal,
    pub json: bool,
}

/// Units per size; repeated sizes accumulate.
fn quantities_by_size(quantities: &[SizeQuantity]) -> Result<BTreeMap<&str, u32>, CommandError> {
    let mut by_size: BTreeMap<&str, u32> = BTreeMap::new();
    for entry in quantities {
        let units = by_size.entry(entry.size.as_str()).or_default();
        *units = units
            .checked_add(entry.units)
            .ok_or(CommandError::QuantityOverflow)?;
    }
    Ok(by_size)
}

/// Price a selection and print the breakdown.
///
/// # Errors
///
/// Returns an error if the price is unreadable, the selection is not legal
/// for the category, or output fails.
pub fn quote<W: Write>(
    catalog: &PricingCatalog,
    args: &QuoteArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    let catalog_price = parse_catalog_price(&args.price)?;
    if catalog_price < Decimal::ZERO {
        return Err(CommandError::NegativePrice);
    }

    let by_size = quantities_by_size(&args.quantities)?;
    let quantity = by_size
        .values()
        .try_fold(0_u32, |total, units| total.checked_add(*units))
        .ok_or(CommandError::QuantityOverflow)?;

    let pricing = catalog.category_pricing(&args.category);
    let method = args
        .method
        .or_else(|| pricing.default_method())
        .ok_or_else(|| SelectionError::NoActiveMethod {
            category: args.category.clone(),
        })?;
    let quote = pricing.checked_quote(
        Some(method),
        catalog_price,
        quantity,
        &args.zones,
        args.tax_rate,
    )?;

    tracing::debug!(
        category = %args.category,
        %method,
        quantity,
        "Quote computed"
    );

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &quote)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Category:       {} ({})", pricing.category, pricing.family)?;
    writeln!(out, "Method:         {method}")?;
    for (size, units) in &by_size {
        writeln!(out, "  {size:<12} {units}")?;
    }
    writeln!(out, "Quantity:       {}", quote.total_quantity)?;
    if quote.meets_minimum {
        writeln!(out, "Minimum:        {} (met)", quote.minimum_quantity)?;
    } else {
        writeln!(
            out,
            "Minimum:        {} ({} more units needed)",
            quote.minimum_quantity,
            quote.units_to_minimum()
        )?;
    }
    let zones = if quote.selected_zones.is_empty() {
        "-".to_string()
    } else {
        quote.selected_zones.join(", ")
    };
    writeln!(out, "Zones:          {zones}")?;
    writeln!(out, "Base price:     {}", format_euro(quote.unit_base_price))?;
    writeln!(out, "Zone cost:      {}", format_euro(quote.unit_customization_cost))?;
    match quote.volume_discount_percent() {
        Some(percent) => writeln!(
            out,
            "Multiplier:     x{} ({percent}% volume discount)",
            quote.applied_scaling_multiplier.normalize()
        )?,
        None => writeln!(
            out,
            "Multiplier:     x{}",
            quote.applied_scaling_multiplier.normalize()
        )?,
    }
    writeln!(out, "Unit price:     {}", format_euro(quote.final_unit_price))?;
    writeln!(out, "Total:          {}", format_euro(quote.total_before_tax))?;
    writeln!(
        out,
        "Total with tax: {} ({}%)",
        format_euro(quote.total_with_tax),
        (args.tax_rate * Decimal::ONE_HUNDRED).normalize()
    )?;
    Ok(())
}

/// Print the resolved pricing options for a category.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn options<W: Write>(
    catalog: &PricingCatalog,
    category: &str,
    json: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let pricing = catalog.category_pricing(category);

    if json {
        serde_json::to_writer_pretty(&mut *out, &pricing)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Category: {} ({})", pricing.category, pricing.family)?;
    writeln!(out, "Formula:  {}", pricing.formula.label)?;
    writeln!(out, "Methods:")?;
    for method in &pricing.allowed_methods {
        let status = if pricing.is_method_active(method.id) {
            "active"
        } else {
            "coming soon"
        };
        let minimum = pricing
            .min_quantity_by_method
            .get(&method.id)
            .copied()
            .unwrap_or(1);
        writeln!(
            out,
            "  {:<20} {:<12} min {minimum:<5} {}",
            method.id.as_str(),
            status,
            method.label
        )?;
    }
    writeln!(out, "Zones:    {}", pricing.allowed_zones.join(", "))?;
    let preselected = ZoneSelection::with_default(&pricing.allowed_zones);
    if let [zone] = preselected.as_slice() {
        writeln!(out, "Default:  {zone}")?;
    }
    writeln!(out, "Volume steps:")?;
    for (threshold, multiplier) in pricing.formula.scaling_steps.as_map() {
        writeln!(out, "  {threshold:>5}+  x{}", multiplier.normalize())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use promo_quote_core::pricing::{DEFAULT_TAX_RATE, QuoteError};

    use super::*;

    fn args(category: &str, price: &str, quantities: &[&str], zones: &[&str]) -> QuoteArgs {
        QuoteArgs {
            category: category.to_string(),
            price: price.to_string(),
            quantities: quantities.iter().map(|q| q.parse().unwrap()).collect(),
            zones: zones.iter().map(ToString::to_string).collect(),
            method: None,
            tax_rate: DEFAULT_TAX_RATE,
            json: false,
        }
    }

    fn run(args: &QuoteArgs) -> Result<String, CommandError> {
        let mut out = Vec::new();
        quote(PricingCatalog::builtin(), args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_size_quantity_parse() {
        assert_eq!(
            "M=30".parse::<SizeQuantity>().unwrap(),
            SizeQuantity {
                size: "M".to_string(),
                units: 30
            }
        );
        assert_eq!("50".parse::<SizeQuantity>().unwrap().size, ONE_SIZE);
        assert!("=5".parse::<SizeQuantity>().is_err());
        assert!("M=-1".parse::<SizeQuantity>().is_err());
        assert!("M=lots".parse::<SizeQuantity>().is_err());
    }

    #[test]
    fn test_quote_text_breakdown() {
        let output = run(&args(
            "t_shirts",
            "20,00 €",
            &["M=30", "L=20"],
            &["frontal", "espalda"],
        ))
        .unwrap();

        assert!(output.contains("Category:       t_shirts (apparel)"));
        assert!(output.contains("Method:         DTF"));
        assert!(output.contains("Quantity:       50"));
        assert!(output.contains("Multiplier:     x3.69"));
        assert!(output.contains("Total with tax: 2422,21\u{a0}€ (21%)"));
    }

    #[test]
    fn test_quote_reports_missing_units() {
        let output = run(&args("t_shirts", "20", &["10"], &[])).unwrap();
        assert!(output.contains("(15 more units needed)"));
        assert!(output.contains("Zones:          -"));
    }

    #[test]
    fn test_quote_json() {
        let mut quote_args = args("t_shirts", "20", &["S=25", "S=25"], &["frontal"]);
        quote_args.json = true;
        let output = run(&quote_args).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["totalQuantity"], 50);
        assert_eq!(json["selectedZones"], serde_json::json!(["frontal"]));
    }

    #[test]
    fn test_quote_rejects_illegal_selection() {
        let mut inactive = args("t_shirts", "20", &["50"], &[]);
        inactive.method = Some(PrintingMethodId::Embroidery);
        assert!(matches!(
            run(&inactive),
            Err(CommandError::Selection(SelectionError::MethodNotActive { .. }))
        ));

        let zone = args("gorras-personalizadas", "8", &["100"], &["manga"]);
        assert!(matches!(
            run(&zone),
            Err(CommandError::Selection(SelectionError::ZoneNotAllowed { .. }))
        ));

        let no_method = args("mugs", "5", &["100"], &[]);
        assert!(matches!(
            run(&no_method),
            Err(CommandError::Selection(SelectionError::NoActiveMethod { .. }))
        ));
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        assert!(matches!(
            run(&args("t_shirts", "consultar", &["50"], &[])),
            Err(CommandError::InvalidPrice(_))
        ));

        let max = u32::MAX.to_string();
        assert!(matches!(
            run(&args("t_shirts", "20", &[&max, "1"], &[])),
            Err(CommandError::QuantityOverflow)
        ));
    }

    #[test]
    fn test_quote_rejects_negative_price() {
        assert!(matches!(
            run(&args("t_shirts", "-5,00 €", &["50"], &[])),
            Err(CommandError::NegativePrice)
        ));
        assert!(matches!(
            run(&args("t_shirts", "\u{2212}5", &["50"], &[])),
            Err(CommandError::NegativePrice)
        ));
    }

    #[test]
    fn test_quote_rejects_out_of_range_amounts() {
        assert!(matches!(
            run(&args("t_shirts", "100000000000000000000", &["50"], &[])),
            Err(CommandError::Quote(QuoteError::PriceOutOfRange(_)))
        ));
        assert!(matches!(
            run(&args("t_shirts", "20", &["4000000000"], &[])),
            Err(CommandError::Quote(QuoteError::QuantityOutOfRange(4_000_000_000)))
        ));
    }

    #[test]
    fn test_options_text() {
        let mut out = Vec::new();
        options(PricingCatalog::builtin(), "t_shirts", false, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Category: t_shirts (apparel)"));
        assert!(output.contains("Default:  frontal"));
        assert!(output.lines().any(|line| line.contains("DTF") && line.contains("active")));
        assert!(
            output
                .lines()
                .any(|line| line.contains("BORDADO") && line.contains("coming soon"))
        );
    }

    #[test]
    fn test_options_json() {
        let mut out = Vec::new();
        options(PricingCatalog::builtin(), "gorras-personalizadas", true, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["allowedZones"], serde_json::json!(["frontal", "espalda"]));
    }
}
