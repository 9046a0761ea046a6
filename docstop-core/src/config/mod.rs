//! Rule configuration
//!
//! The defaults are embedded from `configs/default.toml`; user files only
//! need the sections they change.

mod loader;
mod types;

pub use loader::{default_config, default_toml};
pub use types::{ExemptionConfig, ReferenceConfig, RuleConfig, TagConfig, TerminatorConfig};
