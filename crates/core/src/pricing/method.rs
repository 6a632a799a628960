//! Printing method catalog.
//!
//! The registry of customization techniques with their display metadata and
//! a central on/off switch. The switch is independent of any family: a method
//! can be allowed for apparel yet inactive everywhere until it is launched.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a customization technique.
///
/// Serialized with the identifiers used by the storefront front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrintingMethodId {
    /// Direct-to-film full colour transfer.
    #[serde(rename = "DTF")]
    Dtf,
    /// Single colour screen printing.
    #[serde(rename = "SERIGRAFIA_1_COLOR")]
    ScreenPrintOneColor,
    /// Textile embroidery.
    #[serde(rename = "BORDADO")]
    Embroidery,
    /// Direct-to-film with UV curing, for rigid surfaces.
    #[serde(rename = "DTF_UV")]
    DtfUv,
    /// Single colour pad printing.
    #[serde(rename = "TAMPO_1_COLOR")]
    PadPrintOneColor,
    /// Blank product, no customization.
    #[serde(rename = "SIN_IMPRESION")]
    NoPrint,
}

impl PrintingMethodId {
    /// Every known method, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Dtf,
        Self::ScreenPrintOneColor,
        Self::Embroidery,
        Self::DtfUv,
        Self::PadPrintOneColor,
        Self::NoPrint,
    ];

    /// Wire identifier of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dtf => "DTF",
            Self::ScreenPrintOneColor => "SERIGRAFIA_1_COLOR",
            Self::Embroidery => "BORDADO",
            Self::DtfUv => "DTF_UV",
            Self::PadPrintOneColor => "TAMPO_1_COLOR",
            Self::NoPrint => "SIN_IMPRESION",
        }
    }
}

impl fmt::Display for PrintingMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known printing method.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown printing method: {0}")]
pub struct UnknownMethodError(pub String);

impl FromStr for PrintingMethodId {
    type Err = UnknownMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownMethodError(s.to_owned()))
    }
}

/// How a method's customization cost is computed.
///
/// Only [`PricingStrategy::FlatPerZone`] has a computation path; the other
/// tags are carried as metadata for methods not yet launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingStrategy {
    /// Fixed additive cost per customization zone.
    FlatPerZone,
    /// Cost driven by the number of ink colours.
    ColorCount,
    /// Cost driven by printed area.
    Area,
}

/// A customization technique offered by the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintingMethod {
    pub id: PrintingMethodId,
    /// Label shown to customers (e.g. "DTF Full Color").
    pub label: String,
    pub description: String,
    pub pricing_type: PricingStrategy,
    /// Global switch; inactive methods are shown as "coming soon" at most.
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Static registry of printing methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodCatalog(Vec<PrintingMethod>);

impl MethodCatalog {
    /// Create a catalog from its entries, in display order.
    #[must_use]
    pub const fn new(methods: Vec<PrintingMethod>) -> Self {
        Self(methods)
    }

    /// Look up a method by id.
    #[must_use]
    pub fn get(&self, id: PrintingMethodId) -> Option<&PrintingMethod> {
        self.0.iter().find(|method| method.id == id)
    }

    /// Whether the method exists and is globally active.
    #[must_use]
    pub fn is_active(&self, id: PrintingMethodId) -> bool {
        self.get(id).is_some_and(|method| method.is_active)
    }

    /// All methods, including inactive ones.
    pub fn iter(&self) -> impl Iterator<Item = &PrintingMethod> {
        self.0.iter()
    }

    /// Globally active methods only.
    pub fn active(&self) -> impl Iterator<Item = &PrintingMethod> {
        self.0.iter().filter(|method| method.is_active)
    }

    /// Problems found in the registry itself.
    pub(crate) fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (i, method) in self.0.iter().enumerate() {
            if self.0.iter().take(i).any(|earlier| earlier.id == method.id) {
                problems.push(format!("printing method {} is listed twice", method.id));
            }
            if method.label.trim().is_empty() {
                problems.push(format!("printing method {} has an empty label", method.id));
            }
        }
        problems
    }
}
