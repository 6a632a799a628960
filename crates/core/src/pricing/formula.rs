//! Per-family pricing formula.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::engine::resolve_scaling_multiplier;
use super::family::PricingFamily;

/// Errors building a [`ScalingSteps`] table.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalingStepsError {
    #[error("scaling steps must contain at least one threshold")]
    Empty,
    #[error("scaling threshold {0:?} is not a non-negative integer")]
    InvalidThreshold(String),
    #[error("scaling multiplier for threshold {threshold} must be positive, got {multiplier}")]
    NonPositiveMultiplier { threshold: u32, multiplier: Decimal },
}

/// Volume discount step table: quantity threshold → unit multiplier.
///
/// Stored documents key thresholds by string (`"25": 5.16`); they are parsed
/// and ordered once when the table is built. A table always has at least one
/// threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Decimal>",
    into = "BTreeMap<String, Decimal>"
)]
pub struct ScalingSteps(BTreeMap<u32, Decimal>);

impl ScalingSteps {
    /// Build a step table from `(threshold, multiplier)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if no pairs are given or a multiplier is not positive.
    pub fn new<I>(steps: I) -> Result<Self, ScalingStepsError>
    where
        I: IntoIterator<Item = (u32, Decimal)>,
    {
        let steps: BTreeMap<u32, Decimal> = steps.into_iter().collect();
        if steps.is_empty() {
            return Err(ScalingStepsError::Empty);
        }
        if let Some((threshold, multiplier)) = steps.iter().find(|(_, m)| **m <= Decimal::ZERO) {
            return Err(ScalingStepsError::NonPositiveMultiplier {
                threshold: *threshold,
                multiplier: *multiplier,
            });
        }
        Ok(Self(steps))
    }

    /// Table from trusted data, skipping validation.
    ///
    /// Only for the built-in catalog; [`super::PricingCatalog::validate`]
    /// still checks the result.
    pub(crate) fn from_trusted(steps: &[(u32, Decimal)]) -> Self {
        Self(steps.iter().copied().collect())
    }

    /// Multiplier applying to `quantity`.
    #[must_use]
    pub fn multiplier_for(&self, quantity: u32) -> Decimal {
        resolve_scaling_multiplier(quantity, self)
    }

    /// Thresholds and multipliers in ascending threshold order.
    #[must_use]
    pub const fn as_map(&self) -> &BTreeMap<u32, Decimal> {
        &self.0
    }

    #[must_use]
    pub fn lowest_threshold(&self) -> u32 {
        self.0.keys().next().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn highest_threshold(&self) -> u32 {
        self.0.keys().next_back().copied().unwrap_or_default()
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for ScalingSteps {
    type Error = ScalingStepsError;

    fn try_from(raw: BTreeMap<String, Decimal>) -> Result<Self, Self::Error> {
        let parsed = raw
            .into_iter()
            .map(|(key, multiplier)| {
                key.trim()
                    .parse::<u32>()
                    .map(|threshold| (threshold, multiplier))
                    .map_err(|_| ScalingStepsError::InvalidThreshold(key))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }
}

impl From<ScalingSteps> for BTreeMap<String, Decimal> {
    fn from(steps: ScalingSteps) -> Self {
        steps
            .0
            .into_iter()
            .map(|(threshold, multiplier)| (threshold.to_string(), multiplier))
            .collect()
    }
}

/// Pricing formula shared by every category of a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingFamilyFormula {
    /// Display label (e.g. "Ropa Personalizada").
    pub label: String,
    pub min_quantity: u32,
    pub scaling_steps: ScalingSteps,
    /// Flat additive unit cost per customization zone.
    pub zone_cost: BTreeMap<String, Decimal>,
    /// Zones legal for the family, in display order.
    pub zones_allowed: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl PricingFamilyFormula {
    /// Unit cost of customizing one zone; zero for unpriced zones.
    #[must_use]
    pub fn zone_cost(&self, zone: &str) -> Decimal {
        self.zone_cost.get(zone).copied().unwrap_or(Decimal::ZERO)
    }

    #[must_use]
    pub fn allows_zone(&self, zone: &str) -> bool {
        self.zones_allowed.iter().any(|allowed| allowed == zone)
    }

    pub(crate) fn problems(&self, family: PricingFamily) -> Vec<String> {
        let mut problems = Vec::new();
        if self.min_quantity == 0 {
            problems.push(format!("formula {family}: minQuantity must be at least 1"));
        }
        if self.scaling_steps.0.is_empty() {
            problems.push(format!("formula {family}: scalingSteps is empty"));
        }
        for (threshold, multiplier) in &self.scaling_steps.0 {
            if *multiplier <= Decimal::ZERO {
                problems.push(format!(
                    "formula {family}: multiplier for threshold {threshold} must be positive"
                ));
            }
        }
        if self.zones_allowed.is_empty() {
            problems.push(format!("formula {family}: zonesAllowed is empty"));
        }
        for (i, zone) in self.zones_allowed.iter().enumerate() {
            if self.zones_allowed.iter().take(i).any(|earlier| earlier == zone) {
                problems.push(format!("formula {family}: zone {zone} is listed twice"));
            }
            if !self.zone_cost.contains_key(zone) {
                tracing::debug!(
                    %family,
                    %zone,
                    "Selectable zone has no cost entry; priced at zero"
                );
            }
        }
        for (zone, cost) in &self.zone_cost {
            if *cost < Decimal::ZERO {
                problems.push(format!("formula {family}: cost of zone {zone} is negative"));
            }
        }
        problems
    }
}
