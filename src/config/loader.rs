//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::FirewallConfig;
use crate::config::validation::ValidationError;
use crate::rules::record::{RuleDocument, RULES_KEY};
use crate::rules::RuleTable;

/// Error type for configuration loading. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rule file error: {0}")]
    Rules(#[from] serde_yml::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse settings from a TOML file without semantic checks, so overrides
/// can be applied before validation.
pub fn parse_config(path: &Path) -> Result<FirewallConfig, ConfigError> {
    let content = read(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the rule file and build the table.
pub fn load_rules(path: &Path) -> Result<RuleTable, ConfigError> {
    let content = read(path)?;
    parse_rules(&content)
}

/// Parse a YAML rule document; only the `rules` list is used.
pub fn parse_rules(yaml: &str) -> Result<RuleTable, ConfigError> {
    if yaml.trim().is_empty() {
        return Ok(RuleTable::empty());
    }
    let document: RuleDocument = serde_yml::from_str(yaml)?;
    let records = document.get(RULES_KEY).map(Vec::as_slice).unwrap_or_default();
    Ok(RuleTable::from_records(records))
}
