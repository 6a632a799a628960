//! Pricing families and the category classification table.

use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A group of semantically similar products sharing one pricing formula.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PricingFamily {
    /// T-shirts, polos, sweatshirts, jackets, workwear.
    Apparel,
    /// Bags, backpacks, caps, tech and travel accessories.
    Accessories,
    /// Mugs, bottles, kitchen and decoration.
    HomeGoods,
    /// Pens, notebooks, diaries.
    Stationery,
    /// Catch-all for unclassified categories.
    #[default]
    Other,
}

impl PricingFamily {
    /// Every family, in table order.
    pub const ALL: [Self; 5] = [
        Self::Apparel,
        Self::Accessories,
        Self::HomeGoods,
        Self::Stationery,
        Self::Other,
    ];

    /// Family used for any category the classification table does not know.
    pub const CATCH_ALL: Self = Self::Other;

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apparel => "apparel",
            Self::Accessories => "accessories",
            Self::HomeGoods => "home_goods",
            Self::Stationery => "stationery",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PricingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no pricing family.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pricing family: {0}")]
pub struct UnknownFamilyError(pub String);

impl FromStr for PricingFamily {
    type Err = UnknownFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| UnknownFamilyError(s.to_owned()))
    }
}

/// One value per pricing family.
///
/// Having a field per family makes every lookup total: there is no way to
/// build a table that lacks an entry for some family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTable<T> {
    pub apparel: T,
    pub accessories: T,
    pub home_goods: T,
    pub stationery: T,
    pub other: T,
}

impl<T> FamilyTable<T> {
    /// Entry for a family.
    #[must_use]
    pub const fn get(&self, family: PricingFamily) -> &T {
        match family {
            PricingFamily::Apparel => &self.apparel,
            PricingFamily::Accessories => &self.accessories,
            PricingFamily::HomeGoods => &self.home_goods,
            PricingFamily::Stationery => &self.stationery,
            PricingFamily::Other => &self.other,
        }
    }

    /// Entries paired with their family, in [`PricingFamily::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PricingFamily, &T)> {
        PricingFamily::ALL
            .into_iter()
            .map(move |family| (family, self.get(family)))
    }
}

/// Maps raw catalog category ids to pricing families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationTable(HashMap<String, PricingFamily>);

impl ClassificationTable {
    #[must_use]
    pub const fn new(entries: HashMap<String, PricingFamily>) -> Self {
        Self(entries)
    }

    /// Resolve a category id by exact match.
    ///
    /// Total: unregistered and empty ids fall back to
    /// [`PricingFamily::CATCH_ALL`].
    #[must_use]
    pub fn resolve(&self, category: &str) -> PricingFamily {
        self.0
            .get(category)
            .copied()
            .unwrap_or(PricingFamily::CATCH_ALL)
    }

    /// Whether the category has an explicit entry.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Category ids explicitly mapped to a family, sorted.
    #[must_use]
    pub fn categories_in(&self, family: PricingFamily) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .0
            .iter()
            .filter(|(_, mapped)| **mapped == family)
            .map(|(category, _)| category.as_str())
            .collect();
        categories.sort_unstable();
        categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, PricingFamily)> for ClassificationTable {
    fn from_iter<I: IntoIterator<Item = (S, PricingFamily)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(category, family)| (category.into(), family))
                .collect(),
        )
    }
}
