use super::types::RuleConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static DEFAULT_CONFIG: OnceLock<RuleConfig> = OnceLock::new();

const DEFAULT_TOML: &str = include_str!("../../configs/default.toml");

/// The embedded default configuration, as TOML text
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// The embedded default configuration, parsed once
pub fn default_config() -> &'static RuleConfig {
    DEFAULT_CONFIG.get_or_init(|| {
        RuleConfig::from_toml_str(DEFAULT_TOML).expect("embedded default configuration is valid")
    })
}

impl RuleConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: RuleConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            Error::Configuration(msg) => {
                Error::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Check the values that the schema alone cannot constrain
    pub fn validate(&self) -> Result<()> {
        if self.terminators.accepted.is_empty() {
            return Err(Error::Configuration(
                "terminators.accepted must not be empty".into(),
            ));
        }

        if !self.terminators.accepted.contains(&self.terminators.insert) {
            return Err(Error::Configuration(format!(
                "terminators.insert '{}' is not one of terminators.accepted",
                self.terminators.insert
            )));
        }

        if let Some(blank) = self
            .exemptions
            .alternative_separators
            .iter()
            .find(|token| token.trim().is_empty() || token.trim() != token.as_str())
        {
            return Err(Error::Configuration(format!(
                "exemptions.alternative_separators entry {blank:?} must be a non-blank trimmed token"
            )));
        }

        if self.references.max_depth == 0 {
            return Err(Error::Configuration(
                "references.max_depth must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
