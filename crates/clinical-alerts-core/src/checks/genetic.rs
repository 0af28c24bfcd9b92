//! Genetic marker checker.

use crate::knowledge::KnowledgeBase;
use crate::models::Alert;

/// Matches patient genetic markers against medications.
pub struct GeneticChecker<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> GeneticChecker<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// One alert per (known marker, medication keyed under it).
    ///
    /// Outer loop over markers, inner over medications, both in patient order.
    pub fn check(&self, markers: &[String], medications: &[String]) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for marker in markers {
            let Some(entry) = self.kb.genetic_entry(marker) else {
                continue;
            };
            for medication in medications {
                if let Some(rule) = entry.get(medication) {
                    alerts.push(Alert::genetic(
                        rule.severity.clone(),
                        marker,
                        medication,
                        &rule.recommendation,
                    ));
                }
            }
        }

        tracing::debug!(
            markers = markers.len(),
            medications = medications.len(),
            alerts = alerts.len(),
            "Genetic check complete"
        );
        alerts
    }
}
