//! Alert report export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::checks::AlertEngine;
use crate::knowledge::KnowledgeBase;
use crate::models::{Alert, AlertCategory, PatientRecord};

/// Alerts for one evaluation, with provenance. Export only.
#[derive(Debug, Clone, Serialize)]
pub struct AlertReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Alerts in generation order
    pub alerts: Vec<Alert>,
}

/// Alert report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report format version
    pub format_version: String,
    /// Unique report identifier
    pub report_id: String,
    /// Generation timestamp
    pub generated_at: String,
    /// Fingerprint of the knowledge base that produced the alerts
    pub knowledge_base_fingerprint: String,
    /// Number of alerts
    pub alert_count: usize,
}

impl AlertReport {
    /// Wrap already generated alerts.
    pub fn new(alerts: Vec<Alert>, kb: &KnowledgeBase) -> Self {
        Self {
            metadata: ReportMetadata {
                format_version: "1.0".to_string(),
                report_id: uuid::Uuid::new_v4().to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                knowledge_base_fingerprint: kb.fingerprint(),
                alert_count: alerts.len(),
            },
            alerts,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Alert texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.alerts.iter().map(Alert::as_str).collect()
    }

    /// Number of alerts per category.
    pub fn count_by_category(&self) -> BTreeMap<AlertCategory, usize> {
        let mut counts = BTreeMap::new();
        for alert in &self.alerts {
            *counts.entry(alert.category()).or_insert(0) += 1;
        }
        counts
    }
}

/// Builds reports from engine runs.
pub struct ReportBuilder<'a> {
    kb: &'a KnowledgeBase,
    engine: AlertEngine<'a>,
}

impl<'a> ReportBuilder<'a> {
    /// Create a report builder with the default engine settings.
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            engine: AlertEngine::new(kb),
        }
    }

    /// Use a preconfigured engine (it must read the same knowledge base).
    pub fn with_engine(mut self, engine: AlertEngine<'a>) -> Self {
        self.engine = engine;
        self
    }

    /// Evaluate a patient and wrap the result.
    pub fn build(&self, patient: &PatientRecord) -> AlertReport {
        let alerts = self.engine.generate_contextual_alerts(patient);
        AlertReport::new(alerts, self.kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_metadata() {
        let kb = KnowledgeBase::builtin();
        let patient = PatientRecord::new()
            .with_allergies(["penicillin"])
            .with_medications(["amoxicillin", "cephalosporins"]);

        let report = ReportBuilder::new(&kb).build(&patient);

        assert_eq!(report.metadata.format_version, "1.0");
        assert_eq!(report.metadata.alert_count, 2);
        assert_eq!(report.metadata.knowledge_base_fingerprint, kb.fingerprint());
        assert_eq!(report.metadata.report_id.len(), 36); // UUID format

        let counts = report.count_by_category();
        assert_eq!(counts.get(&AlertCategory::Allergy), Some(&1));
        assert_eq!(counts.get(&AlertCategory::CrossReactivity), Some(&1));
    }

    #[test]
    fn test_report_json() {
        let kb = KnowledgeBase::builtin();
        let patient = PatientRecord::new().with_medications(["warfarin", "amiodarone"]);

        let report = ReportBuilder::new(&kb).build(&patient);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["alert_count"], 1);
        assert_eq!(value["alerts"][0]["category"], "interaction");
        assert_eq!(value["alerts"][0]["severity"], "high");
        assert_eq!(report.texts()[0], value["alerts"][0]["text"].as_str().unwrap());
    }

    #[test]
    fn test_exported_text_matches_category_and_severity() {
        let kb = KnowledgeBase::builtin();
        let patient = PatientRecord::new()
            .with_genetic_info(["CYP2C19 Poor Metabolizer"])
            .with_allergies(["penicillin"])
            .with_medications(["clopidogrel", "cephalosporins", "warfarin", "amiodarone"])
            .with_comorbidities(["elderly"])
            .with_age(70);

        let report = ReportBuilder::new(&kb).build(&patient);
        assert_eq!(report.metadata.alert_count, report.alerts.len());

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let alerts = value["alerts"].as_array().unwrap();
        assert_eq!(alerts.len(), report.alerts.len());

        for (alert, exported) in report.alerts.iter().zip(alerts) {
            let prefix = format!("[{}] {} alert:", alert.severity(), alert.category());
            assert!(exported["text"].as_str().unwrap().starts_with(&prefix));
            assert_eq!(exported["text"], alert.as_str());
        }
    }

    #[test]
    fn test_report_with_custom_engine() {
        let kb = KnowledgeBase::builtin();
        let patient = PatientRecord::new()
            .with_medications(["benzodiazepines"])
            .with_age(70);

        let default_report = ReportBuilder::new(&kb).build(&patient);
        assert_eq!(default_report.metadata.alert_count, 1);

        let strict = ReportBuilder::new(&kb)
            .with_engine(AlertEngine::new(&kb).with_age_threshold(75))
            .build(&patient);
        assert_eq!(strict.metadata.alert_count, 0);
    }
}
