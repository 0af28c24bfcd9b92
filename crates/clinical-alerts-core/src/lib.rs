//! Clinical Alerts Core Library
//!
//! Contextual prescribing alerts from a patient's genetic markers, allergy
//! history, current medications, comorbidities and age.
//!
//! # Architecture
//!
//! ```text
//!                         PatientRecord
//!                               │
//!          ┌──────────────┬─────┴────────┬────────────────┐
//!          ▼              ▼              ▼                ▼
//!       Genetic        Allergy      Interaction    Comorbidity/Age
//!       Checker        Checker        Checker          Checker
//!          │              │              │                │
//!          └──────────────┴──────┬───────┴────────────────┘
//!                                │  (read-only lookups)
//!                         KnowledgeBase
//!
//!     Alerts = genetic ++ allergy ++ interaction ++ comorbidity/age
//! ```
//!
//! # Core Principle
//!
//! **Alerts are advisory.** Severity is a display label only; nothing is
//! filtered, ranked or deduplicated.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, Alert, Severity, rule entries)
//! - [`knowledge`]: Read-only knowledge tables
//! - [`checks`]: The four checkers and the aggregating engine
//! - [`config`]: Environment-driven configuration
//! - [`export`]: Alert report export

pub mod checks;
pub mod config;
pub mod export;
pub mod knowledge;
pub mod models;

// Re-export commonly used types
pub use checks::{generate_contextual_alert_texts, generate_contextual_alerts, AlertEngine};
pub use crate::config::AlertsConfig;
pub use export::{AlertReport, ReportBuilder};
pub use knowledge::KnowledgeBase;
pub use models::{Alert, AlertCategory, ClinicalNotes, PatientRecord, Severity, ValidationError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, RwLock};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicalAlertsError {
    #[error("Knowledge base error: {0}")]
    KnowledgeBaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<knowledge::KnowledgeError> for ClinicalAlertsError {
    fn from(e: knowledge::KnowledgeError) -> Self {
        ClinicalAlertsError::KnowledgeBaseError(e.to_string())
    }
}

impl From<models::ValidationError> for ClinicalAlertsError {
    fn from(e: models::ValidationError) -> Self {
        ClinicalAlertsError::ValidationError(e.to_string())
    }
}

impl From<serde_json::Error> for ClinicalAlertsError {
    fn from(e: serde_json::Error) -> Self {
        ClinicalAlertsError::SerializationError(e.to_string())
    }
}

impl From<crate::config::ConfigError> for ClinicalAlertsError {
    fn from(e: crate::config::ConfigError) -> Self {
        ClinicalAlertsError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicalAlertsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicalAlertsError::KnowledgeBaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Free Functions (exported to FFI)
// =========================================================================

/// Validate a JSON patient record and return alert strings from the built-in tables.
#[uniffi::export]
pub fn generate_contextual_alerts_json(patient_json: String) -> Result<Vec<String>, ClinicalAlertsError> {
    let patient = PatientRecord::from_json(&patient_json)?;
    Ok(generate_contextual_alert_texts(&patient))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine for FFI.
///
/// Holds one knowledge base at a time; replacing it swaps the whole table set.
#[derive(uniffi::Object)]
pub struct ClinicalAlertsEngine {
    kb: RwLock<Arc<KnowledgeBase>>,
    elderly_age_threshold: i64,
}

#[uniffi::export]
impl ClinicalAlertsEngine {
    /// Engine over the built-in tables.
    #[uniffi::constructor]
    pub fn new_with_builtin_tables() -> Arc<Self> {
        Arc::new(Self {
            kb: RwLock::new(Arc::new(KnowledgeBase::builtin())),
            elderly_age_threshold: checks::ELDERLY_AGE_THRESHOLD,
        })
    }

    /// Engine over tables loaded from JSON.
    #[uniffi::constructor]
    pub fn new_from_knowledge_json(json: String) -> Result<Arc<Self>, ClinicalAlertsError> {
        let kb = KnowledgeBase::from_json(&json)?;
        Ok(Arc::new(Self {
            kb: RwLock::new(Arc::new(kb)),
            elderly_age_threshold: checks::ELDERLY_AGE_THRESHOLD,
        }))
    }

    /// Engine configured from `CLINICAL_ALERTS_*` environment variables.
    #[uniffi::constructor]
    pub fn new_from_env() -> Result<Arc<Self>, ClinicalAlertsError> {
        let config = AlertsConfig::from_env()?;
        let kb = config.load_knowledge_base()?;
        Ok(Arc::new(Self {
            kb: RwLock::new(Arc::new(kb)),
            elderly_age_threshold: config.elderly_age_threshold,
        }))
    }

    /// Replace the whole knowledge base. In-flight evaluations keep the old tables.
    pub fn replace_knowledge_base(&self, json: String) -> Result<(), ClinicalAlertsError> {
        let kb = Arc::new(KnowledgeBase::from_json(&json)?);
        let mut guard = self.kb.write()?;
        *guard = kb;
        Ok(())
    }

    /// Fingerprint of the current knowledge base.
    pub fn knowledge_base_fingerprint(&self) -> Result<String, ClinicalAlertsError> {
        Ok(self.current()?.fingerprint())
    }

    /// Alert strings for a typed patient record.
    pub fn generate_alerts(&self, patient: FfiPatientRecord) -> Result<Vec<String>, ClinicalAlertsError> {
        let kb = self.current()?;
        let engine = self.engine(&kb);
        Ok(engine.generate_contextual_alert_texts(&patient.into()))
    }

    /// Alert strings for a JSON patient record.
    pub fn generate_alerts_json(&self, patient_json: String) -> Result<Vec<String>, ClinicalAlertsError> {
        let patient = PatientRecord::from_json(&patient_json)?;
        let kb = self.current()?;
        Ok(self.engine(&kb).generate_contextual_alert_texts(&patient))
    }

    /// Full JSON report for a JSON patient record.
    pub fn generate_report_json(&self, patient_json: String) -> Result<String, ClinicalAlertsError> {
        let patient = PatientRecord::from_json(&patient_json)?;
        let kb = self.current()?;
        let report = ReportBuilder::new(&kb)
            .with_engine(self.engine(&kb))
            .build(&patient);
        Ok(report.to_json()?)
    }
}

impl ClinicalAlertsEngine {
    fn current(&self) -> Result<Arc<KnowledgeBase>, ClinicalAlertsError> {
        Ok(Arc::clone(&*self.kb.read()?))
    }

    fn engine<'a>(&self, kb: &'a KnowledgeBase) -> AlertEngine<'a> {
        AlertEngine::new(kb).with_age_threshold(self.elderly_age_threshold)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient record.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiPatientRecord {
    pub genetic_info: Vec<String>,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub comorbidities: Vec<String>,
    pub age: i64,
    pub clinical_notes: Option<FfiClinicalNotes>,
}

impl From<FfiPatientRecord> for PatientRecord {
    fn from(record: FfiPatientRecord) -> Self {
        PatientRecord {
            genetic_info: record.genetic_info,
            allergies: record.allergies,
            medications: record.medications,
            comorbidities: record.comorbidities,
            age: record.age,
            clinical_notes: record.clinical_notes.map(Into::into),
        }
    }
}

impl From<PatientRecord> for FfiPatientRecord {
    fn from(record: PatientRecord) -> Self {
        Self {
            genetic_info: record.genetic_info,
            allergies: record.allergies,
            medications: record.medications,
            comorbidities: record.comorbidities,
            age: record.age,
            clinical_notes: record.clinical_notes.map(Into::into),
        }
    }
}

/// FFI-safe structured consultation notes.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicalNotes {
    pub transcript: String,
    pub diagnoses: Vec<String>,
    pub treatment_plans: Vec<String>,
    pub key_elements: Vec<String>,
}

impl From<FfiClinicalNotes> for ClinicalNotes {
    fn from(notes: FfiClinicalNotes) -> Self {
        ClinicalNotes {
            transcript: notes.transcript,
            diagnoses: notes.diagnoses,
            treatment_plans: notes.treatment_plans,
            key_elements: notes.key_elements,
        }
    }
}

impl From<ClinicalNotes> for FfiClinicalNotes {
    fn from(notes: ClinicalNotes) -> Self {
        Self {
            transcript: notes.transcript,
            diagnoses: notes.diagnoses,
            treatment_plans: notes.treatment_plans,
            key_elements: notes.key_elements,
        }
    }
}
