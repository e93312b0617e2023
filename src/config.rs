//! # Lookup configuration
//!
//! [`LookupConfig`] gathers the tunables of the target entry core: where SIMBAD lives, how long
//! to wait before and during a search, how many identifier rows to request, and how the
//! coordinate fields react to unparseable text.
//!
//! Every field has a default, so a TOML document only needs to list what it overrides:
//!
//! ```rust
//! use pst_target::config::LookupConfig;
//!
//! let cfg = LookupConfig::from_toml_str("debounce_ms = 250\nrow_limit = 20").unwrap();
//! assert_eq!(cfg.debounce_ms, 250);
//! assert_eq!(cfg.row_limit, 20);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::{
    constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_ROW_LIMIT, DEFAULT_TIMEOUT_SECS, SIMBAD_TAP_URL},
    simbad::query::QueryKind,
    target_errors::TargetError,
};

/// What a coordinate field does when its text matches neither grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidCoordinatePolicy {
    /// Mark the offending field invalid and leave the rest of the draft alone.
    #[default]
    MarkField,
    /// Also clear the draft's target name, blocking submission until a name is typed again.
    ClearName,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub simbad_url: String,
    pub timeout_secs: u64,
    pub debounce_ms: u64,
    pub row_limit: usize,
    pub query_kind: QueryKind,
    pub invalid_coordinate_policy: InvalidCoordinatePolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            simbad_url: SIMBAD_TAP_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            row_limit: DEFAULT_ROW_LIMIT,
            query_kind: QueryKind::default(),
            invalid_coordinate_policy: InvalidCoordinatePolicy::default(),
        }
    }
}

impl LookupConfig {
    /// Parse a TOML document, falling back to defaults for missing keys.
    pub fn from_toml_str(document: &str) -> Result<Self, TargetError> {
        Ok(toml::from_str(document)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
