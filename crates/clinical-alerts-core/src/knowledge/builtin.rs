//! Reference knowledge tables.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{AllergyRule, ComorbidityRule, GeneticRule, InteractionRule, Severity};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Genetic marker → medication → rule.
pub(super) fn genetic_table() -> BTreeMap<String, BTreeMap<String, GeneticRule>> {
    let mut map = BTreeMap::new();

    let mut cyp2c19 = BTreeMap::new();
    cyp2c19.insert(
        "clopidogrel".into(),
        GeneticRule {
            severity: Severity::High,
            recommendation:
                "Consider alternative antiplatelet therapy (e.g., prasugrel, ticagrelor).".into(),
        },
    );
    map.insert("CYP2C19 Poor Metabolizer".into(), cyp2c19);

    let mut hla_b5701 = BTreeMap::new();
    hla_b5701.insert(
        "abacavir".into(),
        GeneticRule {
            severity: Severity::Critical,
            recommendation: "Contraindicated. Do not prescribe abacavir.".into(),
        },
    );
    map.insert("HLA-B*5701 Positive".into(), hla_b5701);

    map
}

/// Allergen → direct and cross-reactive medications.
pub(super) fn allergy_table() -> BTreeMap<String, AllergyRule> {
    let mut map = BTreeMap::new();

    map.insert(
        "penicillin".into(),
        AllergyRule {
            medications: set(&["amoxicillin", "ampicillin", "penicillin"]),
            severity: Severity::High,
            cross_reactivity: set(&["cephalosporins"]),
        },
    );
    map.insert(
        "sulfa".into(),
        AllergyRule {
            medications: set(&["sulfamethoxazole", "sulfasalazine"]),
            severity: Severity::Moderate,
            cross_reactivity: BTreeSet::new(),
        },
    );

    map
}

/// Drug-drug interaction pairs, one canonical orientation each.
pub(super) fn interaction_table() -> Vec<InteractionRule> {
    vec![
        InteractionRule {
            drug_a: "warfarin".into(),
            drug_b: "amiodarone".into(),
            severity: Severity::High,
            warning: "Increased bleeding risk".into(),
            recommendation: "Monitor INR closely and adjust warfarin dose as needed.".into(),
        },
        InteractionRule {
            drug_a: "simvastatin".into(),
            drug_b: "clarithromycin".into(),
            severity: Severity::Critical,
            warning: "Risk of rhabdomyolysis".into(),
            recommendation: "Avoid combination; consider alternative statin or antibiotic.".into(),
        },
    ]
}

/// Condition → medications needing caution. Includes the synthetic `elderly` key.
pub(super) fn comorbidity_table() -> BTreeMap<String, ComorbidityRule> {
    let mut map = BTreeMap::new();

    map.insert(
        "chronic_kidney_disease".into(),
        ComorbidityRule {
            medications: set(&["metformin", "NSAIDs"]),
            severity: Severity::High,
            recommendation: "Avoid or adjust dose; monitor renal function.".into(),
        },
    );
    map.insert(
        super::ELDERLY_KEY.into(),
        ComorbidityRule {
            medications: set(&["benzodiazepines", "anticholinergics"]),
            severity: Severity::Moderate,
            recommendation: "Use with caution; increased risk of falls and confusion.".into(),
        },
    );

    map
}
