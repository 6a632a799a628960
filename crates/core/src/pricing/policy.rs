//! Per-family printing method policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::family::PricingFamily;
use super::method::PrintingMethodId;

/// Which printing methods a family supports and what each one requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPrintingPolicy {
    /// Methods allowed at all for the family.
    pub methods: Vec<PrintingMethodId>,
    /// Subset of `methods` surfaced to customers today.
    #[serde(rename = "activeInUI")]
    pub active_in_ui: Vec<PrintingMethodId>,
    /// Minimum order quantity per method.
    #[serde(default)]
    pub min_qty_by_method: BTreeMap<PrintingMethodId, u32>,
}

impl FamilyPrintingPolicy {
    /// Minimum used when a method has no configured entry.
    pub const FALLBACK_MIN_QUANTITY: u32 = 1;

    /// Minimum order quantity for a method, or 1 when unconfigured.
    #[must_use]
    pub fn minimum_quantity(&self, method: PrintingMethodId) -> u32 {
        self.min_qty_by_method
            .get(&method)
            .copied()
            .unwrap_or(Self::FALLBACK_MIN_QUANTITY)
    }

    #[must_use]
    pub fn allows(&self, method: PrintingMethodId) -> bool {
        self.methods.contains(&method)
    }

    #[must_use]
    pub fn is_active_in_ui(&self, method: PrintingMethodId) -> bool {
        self.active_in_ui.contains(&method)
    }

    /// Allowed methods that have no minimum-quantity entry.
    pub fn methods_missing_minimum(&self) -> impl Iterator<Item = PrintingMethodId> + '_ {
        self.methods
            .iter()
            .copied()
            .filter(|method| !self.min_qty_by_method.contains_key(method))
    }

    pub(crate) fn problems(&self, family: PricingFamily) -> Vec<String> {
        let mut problems = Vec::new();
        if self.methods.is_empty() {
            problems.push(format!("family {family}: no printing methods allowed"));
        }
        for method in &self.active_in_ui {
            if !self.allows(*method) {
                problems.push(format!(
                    "family {family}: {method} is active in UI but not an allowed method"
                ));
            }
        }
        for (method, min) in &self.min_qty_by_method {
            if *min == 0 {
                problems.push(format!("family {family}: minimum for {method} must be at least 1"));
            }
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apparel() -> FamilyPrintingPolicy {
        FamilyPrintingPolicy {
            methods: vec![
                PrintingMethodId::Dtf,
                PrintingMethodId::ScreenPrintOneColor,
                PrintingMethodId::Embroidery,
            ],
            active_in_ui: vec![PrintingMethodId::Dtf],
            min_qty_by_method: BTreeMap::from([
                (PrintingMethodId::Dtf, 25),
                (PrintingMethodId::ScreenPrintOneColor, 50),
            ]),
        }
    }

    #[test]
    fn test_minimum_quantity_configured() {
        assert_eq!(apparel().minimum_quantity(PrintingMethodId::Dtf), 25);
        assert_eq!(
            apparel().minimum_quantity(PrintingMethodId::ScreenPrintOneColor),
            50
        );
    }

    #[test]
    fn test_minimum_quantity_falls_back_to_one() {
        assert_eq!(apparel().minimum_quantity(PrintingMethodId::Embroidery), 1);
        assert_eq!(apparel().minimum_quantity(PrintingMethodId::DtfUv), 1);
    }

    #[test]
    fn test_active_in_ui() {
        let policy = apparel();
        assert!(policy.is_active_in_ui(PrintingMethodId::Dtf));
        assert!(!policy.is_active_in_ui(PrintingMethodId::ScreenPrintOneColor));
        assert!(!policy.is_active_in_ui(PrintingMethodId::NoPrint));
    }

    #[test]
    fn test_methods_missing_minimum() {
        let missing: Vec<_> = apparel().methods_missing_minimum().collect();
        assert_eq!(missing, vec![PrintingMethodId::Embroidery]);
    }

    #[test]
    fn test_problems_flags_active_outside_allowed() {
        let mut policy = apparel();
        policy.active_in_ui.push(PrintingMethodId::DtfUv);
        policy.min_qty_by_method.insert(PrintingMethodId::Embroidery, 0);

        let problems = policy.problems(PricingFamily::Apparel);
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("DTF_UV")));
    }

    #[test]
    fn test_yaml_field_names() {
        let yaml =
            "methods: [DTF_UV, TAMPO_1_COLOR]\nactiveInUI: []\nminQtyByMethod:\n  DTF_UV: 20\n";
        let policy: FamilyPrintingPolicy = serde_yaml::from_str(yaml).expect("valid policy");
        assert!(policy.active_in_ui.is_empty());
        assert_eq!(policy.minimum_quantity(PrintingMethodId::DtfUv), 20);
        assert_eq!(policy.minimum_quantity(PrintingMethodId::PadPrintOneColor), 1);
    }
}
