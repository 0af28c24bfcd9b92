//! Comorbidity and age checker.

use crate::knowledge::KnowledgeBase;
use crate::models::Alert;

/// Age at which the `elderly` rule applies.
pub const ELDERLY_AGE_THRESHOLD: i64 = 65;

/// Matches comorbidities, and the elderly age rule, against medications.
pub struct ComorbidityChecker<'a> {
    kb: &'a KnowledgeBase,
    elderly_age_threshold: i64,
}

impl<'a> ComorbidityChecker<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            elderly_age_threshold: ELDERLY_AGE_THRESHOLD,
        }
    }

    /// Override the age at which the elderly rule starts to apply.
    pub fn with_age_threshold(mut self, threshold: i64) -> Self {
        self.elderly_age_threshold = threshold;
        self
    }

    pub fn age_threshold(&self) -> i64 {
        self.elderly_age_threshold
    }

    /// Comorbidity alerts first, then age alerts.
    ///
    /// The age rule runs whether or not `elderly` is also listed as a
    /// comorbidity; both alerts are emitted in that case.
    pub fn check(&self, comorbidities: &[String], medications: &[String], age: i64) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for condition in comorbidities {
            let Some(rule) = self.kb.comorbidity_rule(condition) else {
                continue;
            };
            for medication in medications {
                if rule.medications.contains(medication) {
                    alerts.push(Alert::comorbidity(
                        rule.severity.clone(),
                        condition,
                        medication,
                        &rule.recommendation,
                    ));
                }
            }
        }

        if age >= self.elderly_age_threshold {
            if let Some(rule) = self.kb.elderly_rule() {
                for medication in medications {
                    if rule.medications.contains(medication) {
                        alerts.push(Alert::age(
                            rule.severity.clone(),
                            medication,
                            &rule.recommendation,
                        ));
                    }
                }
            }
        }

        tracing::debug!(
            comorbidities = comorbidities.len(),
            medications = medications.len(),
            age,
            alerts = alerts.len(),
            "Comorbidity check complete"
        );
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertCategory;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_comorbidity_alert() {
        let kb = KnowledgeBase::builtin();
        let checker = ComorbidityChecker::new(&kb);

        let alerts = checker.check(
            &strings(&["chronic_kidney_disease"]),
            &strings(&["metformin", "lisinopril"]),
            40,
        );

        assert_eq!(alerts.len(), 1);
        assert_eq!(
            alerts[0].as_str(),
            "[HIGH] Comorbidity alert: chronic_kidney_disease with metformin. \
             Recommendation: Avoid or adjust dose; monitor renal function."
        );
    }

    #[test]
    fn test_age_boundary() {
        let kb = KnowledgeBase::builtin();
        let checker = ComorbidityChecker::new(&kb);
        let meds = strings(&["benzodiazepines"]);

        let at_65 = checker.check(&[], &meds, 65);
        assert_eq!(at_65.len(), 1);
        assert_eq!(at_65[0].category(), AlertCategory::Age);
        assert_eq!(
            at_65[0].as_str(),
            "[MODERATE] Age alert: Elderly patient with benzodiazepines. \
             Recommendation: Use with caution; increased risk of falls and confusion."
        );

        assert!(checker.check(&[], &meds, 64).is_empty());
    }

    #[test]
    fn test_zero_and_negative_age() {
        let kb = KnowledgeBase::builtin();
        let checker = ComorbidityChecker::new(&kb);
        let meds = strings(&["anticholinergics"]);

        assert!(checker.check(&[], &meds, 0).is_empty());
        assert!(checker.check(&[], &meds, -70).is_empty());
    }

    #[test]
    fn test_explicit_elderly_and_age_both_fire() {
        let kb = KnowledgeBase::builtin();
        let checker = ComorbidityChecker::new(&kb);

        let alerts = checker.check(&strings(&["elderly"]), &strings(&["benzodiazepines"]), 80);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category(), AlertCategory::Comorbidity);
        assert_eq!(
            alerts[0].as_str(),
            "[MODERATE] Comorbidity alert: elderly with benzodiazepines. \
             Recommendation: Use with caution; increased risk of falls and confusion."
        );
        assert_eq!(alerts[1].category(), AlertCategory::Age);
    }

    #[test]
    fn test_missing_elderly_entry() {
        let kb = KnowledgeBase::from_json(
            r#"{"comorbidity":{"asthma":{"medications":["propranolol"],"severity":"high","recommendation":"Avoid."}}}"#,
        )
        .unwrap();
        let checker = ComorbidityChecker::new(&kb);

        assert!(checker
            .check(&[], &strings(&["benzodiazepines"]), 90)
            .is_empty());
        assert_eq!(
            checker
                .check(&strings(&["asthma"]), &strings(&["propranolol"]), 90)
                .len(),
            1
        );
    }

    #[test]
    fn test_custom_threshold() {
        let kb = KnowledgeBase::builtin();
        let checker = ComorbidityChecker::new(&kb).with_age_threshold(75);
        let meds = strings(&["benzodiazepines"]);

        assert!(checker.check(&[], &meds, 70).is_empty());
        assert_eq!(checker.check(&[], &meds, 75).len(), 1);
    }
}
