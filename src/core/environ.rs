//! Environment access.
//!
//! The process environment is read exactly once, through an [`Environ`],
//! into an immutable [`Snapshot`]. Nothing in the engine touches
//! `std::env` afterwards.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::types::VarName;

/// A single `NAME=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: VarName,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Source of environment variables.
pub trait Environ {
    /// All variables, in source order.
    fn vars(&self) -> Vec<EnvVar>;
}

/// The real process environment.
///
/// Entries that are not valid UTF-8 are skipped: they cannot be matched,
/// but the launched command still inherits them untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnviron;

impl Environ for OsEnviron {
    fn vars(&self) -> Vec<EnvVar> {
        std::env::vars_os()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some(EnvVar { name, value }),
                (name, _) => {
                    debug!(name = ?name, "skipping non-UTF-8 environment variable");
                    None
                }
            })
            .collect()
    }
}

/// In-memory environment, used by tests and embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnviron {
    vars: BTreeMap<VarName, String>,
}

impl MemoryEnviron {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnviron {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environ for MemoryEnviron {
    fn vars(&self) -> Vec<EnvVar> {
        self.vars
            .iter()
            .map(|(name, value)| EnvVar::new(name, value))
            .collect()
    }
}

/// Immutable capture of an environment, taken once at start.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    vars: Vec<EnvVar>,
}

impl Snapshot {
    /// Capture every variable from `source`.
    pub fn capture(source: &dyn Environ) -> Self {
        let vars = source.vars();
        debug!(count = vars.len(), "captured environment");
        Self { vars }
    }

    pub fn vars(&self) -> &[EnvVar] {
        &self.vars
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }
}
