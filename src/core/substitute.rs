//! Applying resolved values to the environment.

use std::collections::BTreeMap;

use tracing::trace;
use zeroize::Zeroizing;

use crate::core::binding::Binding;
use crate::core::environ::Snapshot;
use crate::core::types::{ParameterName, VarName};

/// A snapshot plus the values substituted into it.
///
/// Variables without an override keep their captured value.
#[derive(Debug, Clone, Default)]
pub struct ResolvedEnvironment {
    snapshot: Snapshot,
    overrides: BTreeMap<VarName, Zeroizing<String>>,
}

impl ResolvedEnvironment {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            overrides: BTreeMap::new(),
        }
    }

    /// Current value of `name`: the override if any, else the captured value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.overrides
            .get(name)
            .map(|v| v.as_str())
            .or_else(|| self.snapshot.get(name))
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.overrides
            .insert(name.to_string(), Zeroizing::new(value.to_string()));
    }

    /// Variables assigned since the snapshot was taken.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Write each found value onto every variable aliased to its name.
///
/// Names not present in `binding` are ignored. Variables whose name is
/// absent from `found` are left untouched.
pub fn apply(
    found: &BTreeMap<ParameterName, Zeroizing<String>>,
    binding: &Binding,
    env: &mut ResolvedEnvironment,
) {
    for (parameter, value) in found {
        for var in binding.aliases(parameter) {
            trace!(var = %var, parameter = %parameter, "substituting");
            env.set(var, value);
        }
    }
}
