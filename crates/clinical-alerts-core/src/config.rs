//! Engine configuration.
//!
//! Values come from defaults, optionally overridden by environment variables
//! prefixed with `CLINICAL_ALERTS_`.

use std::collections::HashMap;
use std::path::PathBuf;

use ::config::{Config, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checks::{AlertEngine, ELDERLY_AGE_THRESHOLD};
use crate::knowledge::{KnowledgeBase, KnowledgeError};

const ENV_PREFIX: &str = "CLINICAL_ALERTS";

/// Path to a JSON knowledge base replacing the built-in tables.
pub const ENV_KNOWLEDGE_BASE: &str = "CLINICAL_ALERTS_KNOWLEDGE_BASE";
/// Elderly age threshold override.
pub const ENV_ELDERLY_AGE: &str = "CLINICAL_ALERTS_ELDERLY_AGE";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertsConfig {
    /// JSON knowledge base file; built-in tables when unset
    #[serde(alias = "knowledge_base")]
    pub knowledge_base_path: Option<PathBuf>,
    /// Age at or above which the elderly rule applies
    #[serde(alias = "elderly_age")]
    pub elderly_age_threshold: i64,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            knowledge_base_path: None,
            elderly_age_threshold: ELDERLY_AGE_THRESHOLD,
        }
    }
}

impl AlertsConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Defaults overridden by `vars` instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    fn load(environment: Environment) -> ConfigResult<Self> {
        let mut config: AlertsConfig = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        // An empty path variable means "use the built-in tables"
        config.knowledge_base_path = config
            .knowledge_base_path
            .filter(|p| !p.as_os_str().is_empty());

        if config.elderly_age_threshold <= 0 {
            tracing::warn!(
                threshold = config.elderly_age_threshold,
                "Elderly age threshold is not positive; every patient will match the age rule"
            );
        }

        Ok(config)
    }

    /// Load the configured knowledge base, or the built-in tables.
    pub fn load_knowledge_base(&self) -> ConfigResult<KnowledgeBase> {
        match &self.knowledge_base_path {
            Some(path) => Ok(KnowledgeBase::from_path(path)?),
            None => Ok(KnowledgeBase::builtin()),
        }
    }

    /// An engine over `kb` using this configuration.
    pub fn engine<'a>(&self, kb: &'a KnowledgeBase) -> AlertEngine<'a> {
        AlertEngine::new(kb).with_age_threshold(self.elderly_age_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn test_defaults() {
        let config = AlertsConfig::from_vars(no_vars()).unwrap();
        assert_eq!(config, AlertsConfig::default());
        assert_eq!(config.elderly_age_threshold, 65);
        assert!(config.knowledge_base_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AlertsConfig::from_vars([
            (ENV_KNOWLEDGE_BASE, "/etc/alerts/kb.json"),
            (ENV_ELDERLY_AGE, "70"),
        ])
        .unwrap();
        assert_eq!(
            config.knowledge_base_path,
            Some(PathBuf::from("/etc/alerts/kb.json"))
        );
        assert_eq!(config.elderly_age_threshold, 70);
    }

    #[test]
    fn test_unprefixed_vars_ignored() {
        let config = AlertsConfig::from_vars([
            ("ELDERLY_AGE", "40"),
            ("OTHER_APP_KNOWLEDGE_BASE", "/tmp/kb.json"),
        ])
        .unwrap();
        assert_eq!(config, AlertsConfig::default());
    }

    #[test]
    fn test_empty_path_means_builtin() {
        let config = AlertsConfig::from_vars([(ENV_KNOWLEDGE_BASE, "")]).unwrap();
        assert!(config.knowledge_base_path.is_none());
    }

    #[test]
    fn test_invalid_age() {
        let err = AlertsConfig::from_vars([(ENV_ELDERLY_AGE, "old")]).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_builtin_when_no_path() {
        let kb = AlertsConfig::default().load_knowledge_base().unwrap();
        assert_eq!(kb, KnowledgeBase::builtin());
    }

    #[test]
    fn test_missing_file_is_error() {
        let config = AlertsConfig {
            knowledge_base_path: Some(PathBuf::from("/nonexistent/kb.json")),
            ..AlertsConfig::default()
        };
        assert!(matches!(
            config.load_knowledge_base(),
            Err(ConfigError::Knowledge(KnowledgeError::Io(_)))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AlertsConfig = serde_json::from_str(r#"{"elderly_age_threshold": 60}"#).unwrap();
        assert_eq!(config.elderly_age_threshold, 60);
        assert!(config.knowledge_base_path.is_none());
    }
}
