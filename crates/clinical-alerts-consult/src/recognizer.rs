//! Clinical entity recognition boundary.

use serde::{Deserialize, Serialize};

/// A labeled span found in consultation text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalEntity {
    pub text: String,
    /// Recognizer label (e.g., "DISEASE", "TREATMENT", "CHEMICAL")
    pub label: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Finds labeled clinical entities in text.
pub trait EntityRecognizer {
    fn recognize(&self, text: &str) -> anyhow::Result<Vec<ClinicalEntity>>;
}

/// Lexicon-based recognizer (for testing and offline use).
///
/// Case-insensitive term lookup; the first occurrence of each term is
/// reported and entities come back in text order.
#[derive(Debug, Clone)]
pub struct KeywordRecognizer {
    lexicon: Vec<(String, String)>,
}

impl Default for KeywordRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRecognizer {
    /// Create a recognizer with the default lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Self::default_lexicon(),
        }
    }

    /// Create a recognizer with no terms.
    pub fn empty() -> Self {
        Self {
            lexicon: Vec::new(),
        }
    }

    /// Add a custom term.
    pub fn add_term(&mut self, term: &str, label: &str) {
        self.lexicon
            .push((term.to_ascii_lowercase(), label.to_ascii_uppercase()));
    }

    fn default_lexicon() -> Vec<(String, String)> {
        let terms = [
            // Conditions
            ("chronic kidney disease", "DISEASE"),
            ("hypertension", "DISEASE"),
            ("diabetes", "DISEASE"),
            ("atrial fibrillation", "DISEASE"),
            ("pneumonia", "DISEASE"),
            ("angina", "CONDITION"),
            ("chest pain", "CONDITION"),
            ("dizziness", "CONDITION"),
            // Treatments and procedures
            ("anticoagulation", "TREATMENT"),
            ("physical therapy", "TREATMENT"),
            ("dose reduction", "TREATMENT"),
            ("echocardiogram", "PROCEDURE"),
            ("blood test", "PROCEDURE"),
            ("inr check", "PROCEDURE"),
            // Medications
            ("warfarin", "CHEMICAL"),
            ("amiodarone", "CHEMICAL"),
            ("clopidogrel", "CHEMICAL"),
            ("metformin", "CHEMICAL"),
            ("amoxicillin", "CHEMICAL"),
        ];

        terms
            .iter()
            .map(|(term, label)| (term.to_string(), label.to_string()))
            .collect()
    }
}

impl EntityRecognizer for KeywordRecognizer {
    fn recognize(&self, text: &str) -> anyhow::Result<Vec<ClinicalEntity>> {
        // ASCII lowering keeps byte offsets aligned with `text`
        let lower = text.to_ascii_lowercase();
        let mut entities = Vec::new();

        for (term, label) in &self.lexicon {
            if let Some(start) = lower.find(term.as_str()) {
                let end = start + term.len();
                entities.push(ClinicalEntity {
                    text: text[start..end].to_string(),
                    label: label.clone(),
                    start_offset: start,
                    end_offset: end,
                });
            }
        }

        entities.sort_by_key(|e| e.start_offset);
        Ok(entities)
    }
}
