//! Contextual alert generation.
//!
//! Pipeline: Patient Record → Genetic → Allergy → Interaction → Comorbidity/Age → Alerts

mod allergy;
mod comorbidity;
mod genetic;
mod interaction;

pub use allergy::*;
pub use comorbidity::*;
pub use genetic::*;
pub use interaction::*;

use crate::knowledge::KnowledgeBase;
use crate::models::{Alert, PatientRecord};

/// Runs the four checkers over one knowledge base.
pub struct AlertEngine<'a> {
    genetic: GeneticChecker<'a>,
    allergy: AllergyChecker<'a>,
    interaction: InteractionChecker<'a>,
    comorbidity: ComorbidityChecker<'a>,
}

impl<'a> AlertEngine<'a> {
    /// Create an engine with the default elderly age threshold.
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            genetic: GeneticChecker::new(kb),
            allergy: AllergyChecker::new(kb),
            interaction: InteractionChecker::new(kb),
            comorbidity: ComorbidityChecker::new(kb),
        }
    }

    /// Override the elderly age threshold.
    pub fn with_age_threshold(mut self, threshold: i64) -> Self {
        self.comorbidity = self.comorbidity.with_age_threshold(threshold);
        self
    }

    /// All alerts for a patient, in category order
    /// genetic → allergy → interaction → comorbidity/age.
    pub fn generate_contextual_alerts(&self, patient: &PatientRecord) -> Vec<Alert> {
        let mut alerts = Vec::new();

        alerts.extend(self.genetic.check(&patient.genetic_info, &patient.medications));
        alerts.extend(self.allergy.check(&patient.allergies, &patient.medications));
        alerts.extend(self.interaction.check(&patient.medications));
        alerts.extend(self.comorbidity.check(
            &patient.comorbidities,
            &patient.medications,
            patient.age,
        ));

        tracing::debug!(alerts = alerts.len(), "Generated contextual alerts");
        alerts
    }

    /// Same as [`AlertEngine::generate_contextual_alerts`], as plain strings.
    pub fn generate_contextual_alert_texts(&self, patient: &PatientRecord) -> Vec<String> {
        self.generate_contextual_alerts(patient)
            .into_iter()
            .map(Alert::into_text)
            .collect()
    }

    pub fn check_genetic(&self, markers: &[String], medications: &[String]) -> Vec<Alert> {
        self.genetic.check(markers, medications)
    }

    pub fn check_allergy(&self, allergies: &[String], medications: &[String]) -> Vec<Alert> {
        self.allergy.check(allergies, medications)
    }

    pub fn check_interactions(&self, medications: &[String]) -> Vec<Alert> {
        self.interaction.check(medications)
    }

    pub fn check_comorbidity(
        &self,
        comorbidities: &[String],
        medications: &[String],
        age: i64,
    ) -> Vec<Alert> {
        self.comorbidity.check(comorbidities, medications, age)
    }
}

/// Generate alerts against the process-wide knowledge base.
pub fn generate_contextual_alerts(patient: &PatientRecord) -> Vec<Alert> {
    AlertEngine::new(KnowledgeBase::global()).generate_contextual_alerts(patient)
}

/// Generate alert strings against the process-wide knowledge base.
pub fn generate_contextual_alert_texts(patient: &PatientRecord) -> Vec<String> {
    AlertEngine::new(KnowledgeBase::global()).generate_contextual_alert_texts(patient)
}
