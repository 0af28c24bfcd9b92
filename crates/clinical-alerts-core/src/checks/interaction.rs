//! Drug-drug interaction checker.

use std::collections::HashSet;

use crate::knowledge::KnowledgeBase;
use crate::models::Alert;

/// Matches co-prescribed medications against known interaction pairs.
pub struct InteractionChecker<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> InteractionChecker<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// One alert per stored pair whose two drugs are both prescribed.
    ///
    /// Iterates the table in stored order and tests set containment, so the
    /// order in which the patient's drugs are listed does not matter.
    pub fn check(&self, medications: &[String]) -> Vec<Alert> {
        let prescribed: HashSet<&str> = medications.iter().map(String::as_str).collect();

        let alerts: Vec<Alert> = self
            .kb
            .interaction_rules()
            .iter()
            .filter(|rule| {
                prescribed.contains(rule.drug_a.as_str()) && prescribed.contains(rule.drug_b.as_str())
            })
            .map(|rule| {
                Alert::interaction(
                    rule.severity.clone(),
                    &rule.drug_a,
                    &rule.drug_b,
                    &rule.warning,
                    &rule.recommendation,
                )
            })
            .collect();

        tracing::debug!(
            medications = prescribed.len(),
            alerts = alerts.len(),
            "Interaction check complete"
        );
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_drug_never_matches() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        assert!(checker.check(&strings(&["warfarin"])).is_empty());
        assert!(checker.check(&[]).is_empty());
    }

    #[test]
    fn test_pair_matches() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        let alerts = checker.check(&strings(&["warfarin", "amiodarone"]));

        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts[0].as_str(),
            "[HIGH] Interaction alert: warfarin + amiodarone - Increased bleeding risk. \
             Recommendation: Monitor INR closely and adjust warfarin dose as needed."
        );
    }

    #[test]
    fn test_reverse_order_matches_stored_orientation() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        let alerts = checker.check(&strings(&["amiodarone", "aspirin", "warfarin"]));

        assert_eq!(alerts.len(), 1);
        // Text follows the table's orientation, not the prescribing order
        assert!(alerts[0].as_str().contains("warfarin + amiodarone"));
    }

    #[test]
    fn test_table_order_drives_output_order() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        let alerts = checker.check(&strings(&[
            "clarithromycin",
            "simvastatin",
            "amiodarone",
            "warfarin",
        ]));

        assert_eq!(alerts.len(), 2);
        assert!(alerts[0].as_str().starts_with("[HIGH] Interaction alert: warfarin"));
        assert!(alerts[1]
            .as_str()
            .starts_with("[CRITICAL] Interaction alert: simvastatin + clarithromycin"));
    }

    #[test]
    fn test_duplicate_prescriptions_emit_once() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        let alerts = checker.check(&strings(&["warfarin", "warfarin", "amiodarone"]));
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_repeated_drug_is_not_a_pair() {
        let kb = KnowledgeBase::builtin();
        let checker = InteractionChecker::new(&kb);

        let alerts = checker.check(&strings(&["warfarin", "warfarin", "simvastatin", "aspirin"]));
        assert!(alerts.is_empty());
    }
}
