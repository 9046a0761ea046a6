//! Rule configuration types

use crate::classify::ElementClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete configuration of the terminator rule
///
/// Every section is optional in TOML; missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Which characters end a paragraph
    #[serde(default)]
    pub terminators: TerminatorConfig,
    /// Paragraphs that need no terminator
    #[serde(default)]
    pub exemptions: ExemptionConfig,
    /// Per-tag class overrides
    #[serde(default)]
    pub tags: TagConfig,
    /// Include and inheritdoc resolution
    #[serde(default)]
    pub references: ReferenceConfig,
}

/// Terminator characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminatorConfig {
    /// Characters accepted at the end of a paragraph
    #[serde(default = "default_accepted")]
    pub accepted: Vec<char>,
    /// Character inserted by fixes; must be one of `accepted`
    #[serde(default = "default_insert")]
    pub insert: char,
}

impl Default for TerminatorConfig {
    fn default() -> Self {
        Self {
            accepted: default_accepted(),
            insert: default_insert(),
        }
    }
}

/// Paragraphs exempt from the rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExemptionConfig {
    /// Whole-paragraph tokens such as `-or-` that stand between alternatives
    #[serde(default = "default_alternative_separators")]
    pub alternative_separators: Vec<String>,
    /// Accept a trailing `:` when more content follows in the same section
    #[serde(default = "default_true")]
    pub lead_in_colon: bool,
}

impl Default for ExemptionConfig {
    fn default() -> Self {
        Self {
            alternative_separators: default_alternative_separators(),
            lead_in_colon: true,
        }
    }
}

/// Element classification overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    /// Class to use for a tag name instead of the built-in one
    #[serde(default)]
    pub overrides: BTreeMap<String, ElementClass>,
}

/// Reference resolution limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Deepest chain of nested references that is followed
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_accepted() -> Vec<char> {
    vec!['.']
}

fn default_insert() -> char {
    '.'
}

fn default_alternative_separators() -> Vec<String> {
    vec!["-or-".to_string()]
}

fn default_max_depth() -> usize {
    8
}

fn default_true() -> bool {
    true
}
