//! Named regex detectors and the ordered registry that holds them.

mod defaults;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::core::error::{ReconError, Result};

/// A named, compiled detector. Matching is case-insensitive throughout.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub name: String,
    pub regex: Regex,
}

impl PatternSpec {
    /// Compile `pattern` under the registry's matching rules.
    pub fn new(name: impl Into<String>, pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            regex: compile(pattern)?,
        })
    }

    fn from_compiled(name: &str, regex: Regex) -> Self {
        Self {
            name: name.to_string(),
            regex,
        }
    }
}

pub(crate) fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Ordered collection of detectors. Insertion order is preserved so scan
/// output and report ordering stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    specs: Vec<PatternSpec>,
}

impl PatternRegistry {
    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Registry preloaded with the built-in detectors.
    pub fn defaults() -> Self {
        Self {
            specs: defaults::default_specs(),
        }
    }

    /// Add a detector. A spec whose name is already registered replaces the
    /// existing one in place, keeping its position.
    pub fn insert(&mut self, spec: PatternSpec) {
        match self.specs.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => {
                debug!(name = %spec.name, "overriding pattern");
                *existing = spec;
            }
            None => self.specs.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PatternSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Compile caller-supplied patterns, one per non-empty line, named
/// `custom_1`, `custom_2`, ... in order.
///
/// Fails on the first line that does not compile, carrying the 1-based
/// line number, so a bad pattern is rejected before any fetch runs.
pub fn load_custom(lines: &[String]) -> Result<Vec<PatternSpec>> {
    let mut specs = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let pattern = line.trim();
        if pattern.is_empty() {
            continue;
        }
        let name = format!("custom_{}", specs.len() + 1);
        let spec = PatternSpec::new(name, pattern).map_err(|source| {
            ReconError::InvalidPattern {
                line: idx + 1,
                source,
            }
        })?;
        specs.push(spec);
    }

    Ok(specs)
}
