//! Structured consultation extraction.

use std::path::Path;

use clinical_alerts_core::{ClinicalNotes, PatientRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recognizer::{ClinicalEntity, EntityRecognizer};
use crate::transcription::Transcriber;

/// Consultation extraction errors.
#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Entity recognition error: {0}")]
    Recognition(String),
}

pub type ConsultResult<T> = Result<T, ConsultError>;

/// Transcript plus the clinical elements extracted from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructuredConsultation {
    pub transcript: String,
    pub diagnoses: Vec<String>,
    pub treatment_plans: Vec<String>,
    pub key_elements: Vec<String>,
}

impl StructuredConsultation {
    /// Attach to a patient record as its clinical notes.
    pub fn attach_to(self, patient: PatientRecord) -> PatientRecord {
        patient.with_clinical_notes(self.into())
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<StructuredConsultation> for ClinicalNotes {
    fn from(consultation: StructuredConsultation) -> Self {
        ClinicalNotes {
            transcript: consultation.transcript,
            diagnoses: consultation.diagnoses,
            treatment_plans: consultation.treatment_plans,
            key_elements: consultation.key_elements,
        }
    }
}

/// Clinical elements grouped by kind, in entity order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicalElements {
    pub diagnoses: Vec<String>,
    pub treatment_plans: Vec<String>,
    pub key_elements: Vec<String>,
}

/// Group entities: `DISEASE`/`CONDITION` are diagnoses, `TREATMENT`/`PROCEDURE`
/// are treatment plans, everything else is a key element.
pub fn extract_clinical_elements(entities: &[ClinicalEntity]) -> ClinicalElements {
    let mut elements = ClinicalElements::default();

    for entity in entities {
        match entity.label.as_str() {
            "DISEASE" | "CONDITION" => elements.diagnoses.push(entity.text.clone()),
            "TREATMENT" | "PROCEDURE" => elements.treatment_plans.push(entity.text.clone()),
            _ => elements.key_elements.push(entity.text.clone()),
        }
    }

    elements
}

/// Transcribe consultation audio and extract its clinical elements.
///
/// A transcription service failure yields an empty transcript, not an error;
/// only a missing audio file is reported.
pub fn structure_consultation<T, R>(
    transcriber: &T,
    recognizer: &R,
    audio: &Path,
) -> ConsultResult<StructuredConsultation>
where
    T: Transcriber + ?Sized,
    R: EntityRecognizer + ?Sized,
{
    if !audio.exists() {
        return Err(ConsultError::AudioNotFound(audio.display().to_string()));
    }

    let transcript = match transcriber.transcribe(audio) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(audio = %audio.display(), error = %e, "Transcription failed; using empty transcript");
            String::new()
        }
    };

    structure_transcript(recognizer, transcript)
}

/// Extract clinical elements from an existing transcript.
pub fn structure_transcript<R>(recognizer: &R, transcript: String) -> ConsultResult<StructuredConsultation>
where
    R: EntityRecognizer + ?Sized,
{
    let entities = recognizer
        .recognize(&transcript)
        .map_err(|e| ConsultError::Recognition(e.to_string()))?;
    let elements = extract_clinical_elements(&entities);

    tracing::debug!(
        entities = entities.len(),
        diagnoses = elements.diagnoses.len(),
        treatment_plans = elements.treatment_plans.len(),
        "Structured consultation"
    );

    Ok(StructuredConsultation {
        transcript,
        diagnoses: elements.diagnoses,
        treatment_plans: elements.treatment_plans,
        key_elements: elements.key_elements,
    })
}

/// Parse a collaborator's JSON reply into a structured consultation.
pub fn parse_consultation_output(json: &str) -> ConsultResult<StructuredConsultation> {
    // Services sometimes wrap the object in prose
    let json_start = json.find('{').ok_or_else(|| {
        ConsultError::InvalidFormat("No JSON object found in response".into())
    })?;
    let json_end = json.rfind('}').ok_or_else(|| {
        ConsultError::InvalidFormat("No closing brace found in response".into())
    })?;
    if json_end < json_start {
        return Err(ConsultError::InvalidFormat(
            "Closing brace precedes opening brace".into(),
        ));
    }

    let output: StructuredConsultation = serde_json::from_str(&json[json_start..=json_end])?;
    Ok(output)
}
