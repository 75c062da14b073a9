//! Parameter name to variable name aliasing.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::environ::Snapshot;
use crate::core::matcher::Matcher;
use crate::core::types::{ParameterName, VarName};
use crate::error::TemplateError;

/// Maps each parameter name to every variable that refers to it.
///
/// Built once from a snapshot; read-only afterwards. Keys iterate in sorted
/// order, which makes batch contents reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Binding {
    aliases: BTreeMap<ParameterName, Vec<VarName>>,
}

impl Binding {
    /// Evaluate `matcher` exactly once per variable in `snapshot`.
    ///
    /// # Errors
    ///
    /// Any evaluation failure aborts the whole build.
    pub fn build(matcher: &Matcher, snapshot: &Snapshot) -> Result<Self, TemplateError> {
        let mut aliases: BTreeMap<ParameterName, Vec<VarName>> = BTreeMap::new();

        for var in snapshot.vars() {
            if let Some(parameter) = matcher.matches(var)? {
                aliases.entry(parameter).or_default().push(var.name.clone());
            }
        }

        debug!(
            parameters = aliases.len(),
            variables = aliases.values().map(Vec::len).sum::<usize>(),
            "matched indirections"
        );

        Ok(Self { aliases })
    }

    /// Distinct parameter names, sorted.
    pub fn names(&self) -> Vec<ParameterName> {
        self.aliases.keys().cloned().collect()
    }

    /// Variables bound to `parameter`, in snapshot order.
    pub fn aliases(&self, parameter: &str) -> &[VarName] {
        self.aliases
            .get(parameter)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
