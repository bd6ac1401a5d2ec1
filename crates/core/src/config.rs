//! Configuration for keynode resolution and the in-memory store.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```toml
//! [keynodes]
//! max_role_index = 10
//!
//! [store]
//! shuffle_results = true
//! seed = 7
//! ```

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::error::{SemError, SemResult};
use crate::identifiers;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Well-known keynode identifiers and the role marker range.
    pub keynodes: KeynodeConfig,
    /// In-memory store behaviour.
    pub store: StoreConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> SemResult<Self> {
        let config: Config = toml::from_str(source)
            .map_err(|e| SemError::invalid_input(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> SemResult<()> {
        self.keynodes.validate()
    }
}

/// Keynode identifiers used by the collection encodings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeynodeConfig {
    /// Smallest positional role index. Only `1` is accepted.
    pub min_role_index: usize,
    /// Largest positional role index.
    // TODO: numbered sets cannot grow past this ceiling; lift it once role
    // markers can be generated on demand instead of resolved by name.
    pub max_role_index: usize,
    /// Prefix of positional role marker identifiers.
    pub role_prefix: String,
    /// Identifier of the tail marker.
    pub tail_marker: String,
    /// Identifier of the sequence relation.
    pub sequence_relation: String,
}

impl Default for KeynodeConfig {
    fn default() -> Self {
        Self {
            min_role_index: identifiers::MIN_ROLE_INDEX,
            max_role_index: identifiers::MAX_ROLE_INDEX,
            role_prefix: identifiers::ROLE_PREFIX.to_string(),
            tail_marker: identifiers::RREL_LAST.to_string(),
            sequence_relation: identifiers::NREL_BASIC_SEQUENCE.to_string(),
        }
    }
}

impl KeynodeConfig {
    /// Accepted positional role indices.
    pub fn role_range(&self) -> RangeInclusive<usize> {
        self.min_role_index..=self.max_role_index
    }

    /// Identifier of the role marker for `index`, e.g. `rrel_3`.
    pub fn role_identifier(&self, index: usize) -> String {
        format!("{}{}", self.role_prefix, index)
    }

    fn validate(&self) -> SemResult<()> {
        if self.min_role_index != identifiers::MIN_ROLE_INDEX {
            return Err(SemError::invalid_input(format!(
                "min_role_index must be {}; numbered positions start there",
                identifiers::MIN_ROLE_INDEX
            )));
        }
        if self.min_role_index > self.max_role_index {
            return Err(SemError::invalid_input(format!(
                "min_role_index ({}) must not exceed max_role_index ({})",
                self.min_role_index, self.max_role_index
            )));
        }
        for (name, value) in [
            ("role_prefix", &self.role_prefix),
            ("tail_marker", &self.tail_marker),
            ("sequence_relation", &self.sequence_relation),
        ] {
            if value.is_empty() {
                return Err(SemError::invalid_input(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// Behaviour of the in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Permute search results before returning them.
    pub shuffle_results: bool,
    /// Seed for the permutation.
    pub seed: u64,
}
