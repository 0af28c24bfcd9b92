//! Patient record models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Malformed patient record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Patient record is not valid JSON: {0}")]
    Json(String),

    #[error("Patient record must be a JSON object")]
    NotAnObject,

    #[error("Field `{field}` must be a list of strings")]
    NotAList { field: String },

    #[error("Field `{field}` has a non-string element at index {index}")]
    NonStringElement { field: String, index: usize },

    #[error("Field `age` must be an integer")]
    InvalidAge,

    #[error("Field `clinical_notes` is malformed: {0}")]
    InvalidNotes(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Structured consultation text attached to a patient record.
///
/// Produced by the consultation extraction collaborator. Carried alongside the
/// record; no checker reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClinicalNotes {
    pub transcript: String,
    pub diagnoses: Vec<String>,
    pub treatment_plans: Vec<String>,
    pub key_elements: Vec<String>,
}

/// A patient's clinical context for one alert evaluation.
///
/// Every field is optional on input; absent or `null` means empty (age 0).
/// Names are exact, case-sensitive strings and patient order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Value")]
pub struct PatientRecord {
    /// Genetic marker names (e.g., "CYP2C19 Poor Metabolizer")
    pub genetic_info: Vec<String>,
    /// Recorded allergen names
    pub allergies: Vec<String>,
    /// Current medication names
    pub medications: Vec<String>,
    /// Co-occurring condition names
    pub comorbidities: Vec<String>,
    /// Age in years
    pub age: i64,
    /// Optional structured consultation text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<ClinicalNotes>,
}

impl PatientRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genetic_info<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genetic_info = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allergies<I, S>(mut self, allergies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = allergies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_medications<I, S>(mut self, medications: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medications = medications.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_comorbidities<I, S>(mut self, comorbidities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comorbidities = comorbidities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = age;
        self
    }

    pub fn with_clinical_notes(mut self, notes: ClinicalNotes) -> Self {
        self.clinical_notes = Some(notes);
        self
    }

    /// Parse and validate a JSON patient record.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| ValidationError::Json(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Validate a loosely-typed record.
    ///
    /// Non-string list elements are rejected rather than silently skipped.
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

        Ok(Self {
            genetic_info: string_list(obj, "genetic_info")?,
            allergies: string_list(obj, "allergies")?,
            medications: string_list(obj, "medications")?,
            comorbidities: string_list(obj, "comorbidities")?,
            age: age_field(obj)?,
            clinical_notes: notes_field(obj)?,
        })
    }

    /// True if no medications are recorded (no checker can fire).
    pub fn has_no_medications(&self) -> bool {
        self.medications.is_empty()
    }
}

impl TryFrom<Value> for PatientRecord {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

fn string_list(obj: &Map<String, Value>, field: &str) -> ValidationResult<Vec<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ValidationError::NonStringElement {
                        field: field.to_string(),
                        index,
                    })
            })
            .collect(),
        Some(_) => Err(ValidationError::NotAList {
            field: field.to_string(),
        }),
    }
}

fn age_field(obj: &Map<String, Value>) -> ValidationResult<i64> {
    match obj.get("age") {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value.as_i64().ok_or(ValidationError::InvalidAge),
    }
}

fn notes_field(obj: &Map<String, Value>) -> ValidationResult<Option<ClinicalNotes>> {
    match obj.get("clinical_notes") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(notes)) => Ok(Some(ClinicalNotes {
            transcript: match notes.get("transcript") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(_) => {
                    return Err(ValidationError::InvalidNotes(
                        "transcript must be a string".into(),
                    ))
                }
            },
            diagnoses: notes_list(notes, "diagnoses")?,
            treatment_plans: notes_list(notes, "treatment_plans")?,
            key_elements: notes_list(notes, "key_elements")?,
        })),
        Some(_) => Err(ValidationError::InvalidNotes("expected an object".into())),
    }
}

fn notes_list(notes: &Map<String, Value>, field: &str) -> ValidationResult<Vec<String>> {
    string_list(notes, field).map_err(|e| ValidationError::InvalidNotes(e.to_string()))
}
