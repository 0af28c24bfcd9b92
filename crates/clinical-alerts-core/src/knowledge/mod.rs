//! Static knowledge tables consulted by the checkers.
//!
//! A [`KnowledgeBase`] is read-only once built. Updating knowledge means
//! building a complete new instance and swapping it in; entries are never
//! patched in place.

mod builtin;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{AllergyRule, ComorbidityRule, GeneticRule, InteractionRule};

/// Knowledge base loading errors.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interaction rule pairs {0} with itself")]
    SelfPair(String),

    #[error("Interaction pair {0} + {1} is stored more than once")]
    DuplicatePair(String, String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// Synthetic comorbidity key consulted by the age rule.
pub const ELDERLY_KEY: &str = "elderly";

static GLOBAL: OnceLock<KnowledgeBase> = OnceLock::new();

/// The four lookup tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBase {
    /// marker → medication → rule
    #[serde(default)]
    genetic: BTreeMap<String, BTreeMap<String, GeneticRule>>,
    /// allergen → rule
    #[serde(default)]
    allergy: BTreeMap<String, AllergyRule>,
    /// Interaction pairs in table order
    #[serde(default)]
    interactions: Vec<InteractionRule>,
    /// condition (or `elderly`) → rule
    #[serde(default)]
    comorbidity: BTreeMap<String, ComorbidityRule>,
}

impl KnowledgeBase {
    /// Build from explicit tables, validating interaction pairs.
    pub fn new(
        genetic: BTreeMap<String, BTreeMap<String, GeneticRule>>,
        allergy: BTreeMap<String, AllergyRule>,
        interactions: Vec<InteractionRule>,
        comorbidity: BTreeMap<String, ComorbidityRule>,
    ) -> KnowledgeResult<Self> {
        let kb = Self {
            genetic,
            allergy,
            interactions,
            comorbidity,
        };
        kb.validate()?;
        Ok(kb)
    }

    /// The reference tables shipped with the library.
    pub fn builtin() -> Self {
        Self {
            genetic: builtin::genetic_table(),
            allergy: builtin::allergy_table(),
            interactions: builtin::interaction_table(),
            comorbidity: builtin::comorbidity_table(),
        }
    }

    /// Process-wide tables, initialized once from [`KnowledgeBase::builtin`].
    pub fn global() -> &'static KnowledgeBase {
        GLOBAL.get_or_init(KnowledgeBase::builtin)
    }

    /// Load a complete table set from JSON.
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        let kb: KnowledgeBase = serde_json::from_str(json)?;
        kb.validate()?;
        tracing::info!(
            fingerprint = %kb.fingerprint(),
            genetic_markers = kb.genetic.len(),
            allergens = kb.allergy.len(),
            interactions = kb.interactions.len(),
            comorbidities = kb.comorbidity.len(),
            "Loaded knowledge base"
        );
        if kb.is_empty() {
            tracing::warn!("Loaded knowledge base has no entries; no alerts will be produced");
        }
        Ok(kb)
    }

    /// Load a complete table set from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> KnowledgeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the tables to JSON (the format accepted by [`KnowledgeBase::from_json`]).
    pub fn to_json(&self) -> KnowledgeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// SHA-256 of the canonical JSON form, hex encoded.
    pub fn fingerprint(&self) -> String {
        // BTreeMap/BTreeSet keep the serialized form stable
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    fn validate(&self) -> KnowledgeResult<()> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        for rule in &self.interactions {
            if rule.drug_a == rule.drug_b {
                return Err(KnowledgeError::SelfPair(rule.drug_a.clone()));
            }
            let key = if rule.drug_a < rule.drug_b {
                (rule.drug_a.as_str(), rule.drug_b.as_str())
            } else {
                (rule.drug_b.as_str(), rule.drug_a.as_str())
            };
            if !seen.insert(key) {
                return Err(KnowledgeError::DuplicatePair(
                    rule.drug_a.clone(),
                    rule.drug_b.clone(),
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.genetic.is_empty()
            && self.allergy.is_empty()
            && self.interactions.is_empty()
            && self.comorbidity.is_empty()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// All medication rules for a marker.
    pub fn genetic_entry(&self, marker: &str) -> Option<&BTreeMap<String, GeneticRule>> {
        self.genetic.get(marker)
    }

    pub fn genetic_rule(&self, marker: &str, medication: &str) -> Option<&GeneticRule> {
        self.genetic.get(marker)?.get(medication)
    }

    pub fn allergy_rule(&self, allergen: &str) -> Option<&AllergyRule> {
        self.allergy.get(allergen)
    }

    /// Interaction rules in table order.
    pub fn interaction_rules(&self) -> &[InteractionRule] {
        &self.interactions
    }

    pub fn comorbidity_rule(&self, condition: &str) -> Option<&ComorbidityRule> {
        self.comorbidity.get(condition)
    }

    /// The rule consulted by the age check.
    pub fn elderly_rule(&self) -> Option<&ComorbidityRule> {
        self.comorbidity.get(ELDERLY_KEY)
    }
}
