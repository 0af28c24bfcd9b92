//! Knowledge-base rule entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Severity;

/// Effect of a genetic marker on one medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneticRule {
    pub severity: Severity,
    pub recommendation: String,
}

/// Allergen entry: drugs that trigger directly, plus drugs that may cross-react.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllergyRule {
    /// Medications that directly trigger the allergy
    pub medications: BTreeSet<String>,
    pub severity: Severity,
    /// Drug classes or names that may cross-react
    #[serde(default)]
    pub cross_reactivity: BTreeSet<String>,
}

/// A documented interaction between two co-prescribed drugs.
///
/// Stored in one canonical orientation; matching is by set containment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionRule {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: Severity,
    pub warning: String,
    pub recommendation: String,
}

/// Medications requiring caution for a condition (or for the `elderly` key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComorbidityRule {
    pub medications: BTreeSet<String>,
    pub severity: Severity,
    pub recommendation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allergy_rule_cross_reactivity_defaults_empty() {
        let rule: AllergyRule =
            serde_json::from_str(r#"{"medications":["a"],"severity":"low"}"#).unwrap();
        assert!(rule.cross_reactivity.is_empty());
        assert_eq!(rule.severity, Severity::Low);
    }
}
