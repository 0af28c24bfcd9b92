//! Alert models emitted by the checkers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity label attached to a knowledge-base entry.
///
/// Display-only: the engine never filters, sorts or escalates on it.
/// Labels outside the known set are kept verbatim in [`Severity::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
    /// Unrecognized label, displayed upper-cased
    Other(String),
}

impl Severity {
    /// Parse a knowledge-base label. Never fails.
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "low" => Severity::Low,
            "moderate" => Severity::Moderate,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Other(label.to_string()),
        }
    }

    /// Lower-case label as stored in the knowledge base.
    pub fn as_label(&self) -> &str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
            Severity::Other(label) => label,
        }
    }

    /// Ordinal `low < moderate < high < critical`; `None` for unrecognized labels.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Severity::Low => Some(0),
            Severity::Moderate => Some(1),
            Severity::High => Some(2),
            Severity::Critical => Some(3),
            Severity::Other(_) => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_label().to_uppercase())
    }
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        Severity::parse(&label)
    }
}

impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        Severity::parse(label)
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_label().to_string()
    }
}

/// Which checker produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Genetic,
    Allergy,
    CrossReactivity,
    Interaction,
    Comorbidity,
    Age,
}

impl AlertCategory {
    /// Name used inside the alert text.
    pub fn display_name(&self) -> &'static str {
        match self {
            AlertCategory::Genetic => "Genetic",
            AlertCategory::Allergy => "Allergy",
            AlertCategory::CrossReactivity => "Cross-reactivity",
            AlertCategory::Interaction => "Interaction",
            AlertCategory::Comorbidity => "Comorbidity",
            AlertCategory::Age => "Age",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A rendered advisory alert.
///
/// The text is fixed at construction; two alerts with the same text are equal.
/// Only the rendering constructors create alerts, so there is no `Deserialize`.
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    category: AlertCategory,
    severity: Severity,
    text: String,
}

impl Alert {
    fn render(category: AlertCategory, severity: Severity, details: String) -> Self {
        let text = format!("[{}] {} alert: {}", severity, category, details);
        Self {
            category,
            severity,
            text,
        }
    }

    /// `[SEV] Genetic alert: {marker} affects {medication}. Recommendation: {recommendation}`
    pub fn genetic(severity: Severity, marker: &str, medication: &str, recommendation: &str) -> Self {
        Self::render(
            AlertCategory::Genetic,
            severity,
            format!(
                "{} affects {}. Recommendation: {}",
                marker, medication, recommendation
            ),
        )
    }

    /// `[SEV] Allergy alert: {allergen} allergy - avoid {medication}.`
    pub fn allergy(severity: Severity, allergen: &str, medication: &str) -> Self {
        Self::render(
            AlertCategory::Allergy,
            severity,
            format!("{} allergy - avoid {}.", allergen, medication),
        )
    }

    /// Always `[MODERATE]`, whatever the allergen entry's own severity.
    pub fn cross_reactivity(allergen: &str, medication: &str) -> Self {
        Self::render(
            AlertCategory::CrossReactivity,
            Severity::Moderate,
            format!("{} allergy may cross-react with {}.", allergen, medication),
        )
    }

    pub fn interaction(
        severity: Severity,
        drug_a: &str,
        drug_b: &str,
        warning: &str,
        recommendation: &str,
    ) -> Self {
        Self::render(
            AlertCategory::Interaction,
            severity,
            format!(
                "{} + {} - {}. Recommendation: {}",
                drug_a, drug_b, warning, recommendation
            ),
        )
    }

    pub fn comorbidity(
        severity: Severity,
        condition: &str,
        medication: &str,
        recommendation: &str,
    ) -> Self {
        Self::render(
            AlertCategory::Comorbidity,
            severity,
            format!(
                "{} with {}. Recommendation: {}",
                condition, medication, recommendation
            ),
        )
    }

    pub fn age(severity: Severity, medication: &str, recommendation: &str) -> Self {
        Self::render(
            AlertCategory::Age,
            severity,
            format!(
                "Elderly patient with {}. Recommendation: {}",
                medication, recommendation
            ),
        )
    }

    pub fn category(&self) -> AlertCategory {
        self.category
    }

    pub fn severity(&self) -> &Severity {
        &self.severity
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl PartialEq for Alert {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Alert {}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Alert> for String {
    fn from(alert: Alert) -> Self {
        alert.text
    }
}
