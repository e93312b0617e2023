//! # Target identity naming
//!
//! When a user enters coordinates without naming the target, a short human-readable name is
//! generated: `Target_` followed by five base-36 digits of a random fraction. When an already
//! named target is moved by hand on the sky viewer, the name is rewritten as
//! `Modified <name>_<suffix>`.
//!
//! Generated names are **candidates**. They are checked right away against the snapshot of the
//! proposal's existing target names ([`SiblingNames`]); collisions are possible and are reported
//! through [`NameValidity::Duplicate`], the server remaining the final arbiter.

use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::constants::NAME_SUFFIX_LEN;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Expand the fractional part of `fraction` into `len` base-36 digits.
///
/// `0.5` gives `"i0000"`; values outside `[0, 1)` are reduced to their fractional part.
pub fn base36_suffix(fraction: f64, len: usize) -> String {
    let mut frac = if fraction.is_finite() {
        fraction.rem_euclid(1.0)
    } else {
        0.0
    };

    let mut suffix = String::with_capacity(len);
    for _ in 0..len {
        frac *= 36.0;
        let digit = (frac.floor() as usize).min(35);
        frac -= digit as f64;
        suffix.push(BASE36_DIGITS[digit] as char);
    }
    suffix
}

/// Random source for generated target names.
#[derive(Debug, Clone)]
pub struct TargetNamer {
    rng: StdRng,
}

impl Default for TargetNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetNamer {
    pub fn new() -> Self {
        TargetNamer {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic namer, for reproducible sessions and tests.
    pub fn seeded(seed: u64) -> Self {
        TargetNamer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn suffix(&mut self) -> String {
        base36_suffix(self.rng.random::<f64>(), NAME_SUFFIX_LEN)
    }

    /// `"Target_" + suffix`
    pub fn generate_default_name(&mut self) -> String {
        format!("Target_{}", self.suffix())
    }

    /// `"Modified " + current + "_" + suffix`, used when a named target is moved on the viewer.
    pub fn modify_name(&mut self, current: &str) -> String {
        format!("Modified {current}_{}", self.suffix())
    }
}

/// Outcome of checking a target name against the sibling snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameValidity {
    #[default]
    Blank,
    Unique,
    Duplicate,
}

impl NameValidity {
    pub fn allows_submission(&self) -> bool {
        matches!(self, NameValidity::Unique)
    }
}

/// Snapshot of the target names already present on the enclosing proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiblingNames {
    names: HashSet<String>,
}

impl<S: Into<String>> FromIterator<S> for SiblingNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SiblingNames {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl SiblingNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Record a newly submitted name so later checks see it.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name.trim())
    }

    /// Classify `name` as blank, unique or already taken.
    pub fn validate(&self, name: &str) -> NameValidity {
        if name.trim().is_empty() {
            NameValidity::Blank
        } else if self.contains(name) {
            NameValidity::Duplicate
        } else {
            NameValidity::Unique
        }
    }
}
