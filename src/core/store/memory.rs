//! In-memory parameter store.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::{Parameter, ParameterStore, Parameters};
use crate::core::types::ParameterName;
use crate::error::StoreError;

/// Parameter store backed by a map.
///
/// Records every call it receives and can be told to fail calls that
/// include a given name, which makes it suitable for exercising both
/// error policies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<ParameterName, String>,
    /// Values returned only when decryption is requested.
    secure: BTreeMap<ParameterName, String>,
    failing: BTreeSet<ParameterName>,
    calls: RefCell<Vec<Vec<ParameterName>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain parameter.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a `SecureString` parameter. Without decryption the store returns
    /// an opaque placeholder instead of `value`.
    pub fn with_secure(mut self, name: &str, value: &str) -> Self {
        self.secure.insert(name.to_string(), value.to_string());
        self
    }

    /// Make any call that includes `name` fail.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Batches received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<ParameterName>> {
        self.calls.borrow().clone()
    }
}

impl ParameterStore for MemoryStore {
    fn get_parameters(
        &self,
        names: &[ParameterName],
        decrypt: bool,
    ) -> Result<Parameters, StoreError> {
        self.calls.borrow_mut().push(names.to_vec());

        if let Some(name) = names.iter().find(|n| self.failing.contains(*n)) {
            return Err(StoreError::Call(format!("injected failure for {}", name)));
        }

        let mut parameters = Parameters::default();
        for name in names {
            let value = match (self.values.get(name), self.secure.get(name)) {
                (Some(value), _) => value.clone(),
                (None, Some(value)) if decrypt => value.clone(),
                (None, Some(_)) => format!("encrypted:{}", name),
                (None, None) => {
                    parameters.invalid.push(name.clone());
                    continue;
                }
            };
            parameters.found.push(Parameter {
                name: name.clone(),
                value,
            });
        }
        Ok(parameters)
    }
}
