//! Per-category overrides of zones and methods.
//!
//! A category listed here ignores its family's defaults for whatever the
//! override specifies. Zones are replaced wholesale, never merged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::method::PrintingMethodId;

/// Override record for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryZoneOverride {
    /// Zones legal for this category, replacing the family's list.
    pub allowed_zones: Vec<String>,
    /// Methods legal for this category, replacing the family's list when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<PrintingMethodId>>,
}

impl CategoryZoneOverride {
    /// Override that only replaces the zone list.
    #[must_use]
    pub fn zones<I, S>(zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_zones: zones.into_iter().map(Into::into).collect(),
            allowed_methods: None,
        }
    }

    /// Also replace the method list.
    #[must_use]
    pub fn with_methods(mut self, methods: Vec<PrintingMethodId>) -> Self {
        self.allowed_methods = Some(methods);
        self
    }
}

/// At most one override per category id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(HashMap<String, CategoryZoneOverride>);

impl OverrideTable {
    #[must_use]
    pub const fn new(entries: HashMap<String, CategoryZoneOverride>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryZoneOverride> {
        self.0.get(category)
    }

    /// Overrides sorted by category id.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &CategoryZoneOverride)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(category, record)| (category.as_str(), record))
            .collect();
        entries.sort_unstable_by_key(|(category, _)| *category);
        entries
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

impl<S: Into<String>> FromIterator<(S, CategoryZoneOverride)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (S, CategoryZoneOverride)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(category, record)| (category.into(), record))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let table: OverrideTable = [(
            "gorras-personalizadas",
            CategoryZoneOverride::zones(["frontal", "espalda"]),
        )]
        .into_iter()
        .collect();

        let record = table.get("gorras-personalizadas").expect("override present");
        assert_eq!(record.allowed_zones, vec!["frontal", "espalda"]);
        assert!(record.allowed_methods.is_none());
        assert!(table.get("gorras").is_none());
    }

    #[test]
    fn test_methods_optional_in_yaml() {
        let yaml = "allowedZones: [frontal]\n";
        let record: CategoryZoneOverride = serde_yaml::from_str(yaml).expect("valid override");
        assert_eq!(record, CategoryZoneOverride::zones(["frontal"]));

        let yaml = "allowedZones: [frontal]\nallowedMethods: [DTF, SIN_IMPRESION]\n";
        let record: CategoryZoneOverride = serde_yaml::from_str(yaml).expect("valid override");
        assert_eq!(
            record.allowed_methods,
            Some(vec![PrintingMethodId::Dtf, PrintingMethodId::NoPrint])
        );
    }

    #[test]
    fn test_sorted_by_category() {
        let table: OverrideTable = [
            ("polos", CategoryZoneOverride::zones(["frontal"])),
            ("bolsas", CategoryZoneOverride::zones(["frontal"])),
        ]
        .into_iter()
        .collect();
        let order: Vec<_> = table.sorted().into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["bolsas", "polos"]);
    }
}
