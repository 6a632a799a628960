//! Pricing catalog document commands.
//!
//! # Usage
//!
//! ```bash
//! # Validate a document; exits non-zero and lists every problem when invalid
//! pq-cli catalog validate pricing.yaml
//!
//! # Start a new document from the built-in catalog
//! pq-cli catalog dump > pricing.yaml
//! ```

use std::io::Write;
use std::path::Path;

use promo_quote_core::pricing::{PricingCatalog, PricingFamily};

use super::CommandError;

/// Validate a YAML catalog document and print a summary.
///
/// # Errors
///
/// Returns [`CommandError::InvalidCatalog`] after printing each problem, or
/// an I/O or parse error if the document cannot be read.
pub fn validate<W: Write>(path: &Path, out: &mut W) -> Result<(), CommandError> {
    let document = std::fs::read_to_string(path)?;
    validate_document(&document, out)
}

fn validate_document<W: Write>(document: &str, out: &mut W) -> Result<(), CommandError> {
    let catalog: PricingCatalog = serde_yaml::from_str(document)?;

    let problems = catalog.validate();
    if !problems.is_empty() {
        for problem in &problems {
            writeln!(out, "error: {problem}")?;
        }
        return Err(CommandError::InvalidCatalog(problems.len()));
    }

    for (family, policy) in catalog.policies.iter() {
        for method in policy.methods_missing_minimum() {
            writeln!(
                out,
                "warning: {family}: no minimum quantity for {method}, 1 will be used"
            )?;
        }
    }

    writeln!(
        out,
        "ok: {} methods ({} active), {} categories, {} overrides",
        catalog.methods.iter().count(),
        catalog.methods.active().count(),
        catalog.categories.len(),
        catalog.overrides.len()
    )?;
    for family in PricingFamily::ALL {
        writeln!(
            out,
            "  {family:<12} {} categories",
            catalog.categories.categories_in(family).len()
        )?;
    }
    Ok(())
}

/// Print a catalog as YAML.
///
/// # Errors
///
/// Returns an error if serialization or output fails.
pub fn dump<W: Write>(catalog: &PricingCatalog, out: &mut W) -> Result<(), CommandError> {
    out.write_all(catalog.to_yaml()?.as_bytes())?;
    Ok(())
}
