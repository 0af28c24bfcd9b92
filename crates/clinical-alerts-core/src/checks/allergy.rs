//! Allergy and cross-reactivity checker.

use crate::knowledge::KnowledgeBase;
use crate::models::Alert;

/// Matches patient allergies against medications, directly and by cross-reactivity.
pub struct AllergyChecker<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> AllergyChecker<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// For each known allergen and each medication, the direct check and the
    /// cross-reactivity check run independently, so one medication may yield
    /// both alerts.
    pub fn check(&self, allergies: &[String], medications: &[String]) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for allergen in allergies {
            let Some(rule) = self.kb.allergy_rule(allergen) else {
                continue;
            };
            for medication in medications {
                if rule.medications.contains(medication) {
                    alerts.push(Alert::allergy(rule.severity.clone(), allergen, medication));
                }
                if rule.cross_reactivity.contains(medication) {
                    alerts.push(Alert::cross_reactivity(allergen, medication));
                }
            }
        }

        tracing::debug!(
            allergies = allergies.len(),
            medications = medications.len(),
            alerts = alerts.len(),
            "Allergy check complete"
        );
        alerts
    }
}
