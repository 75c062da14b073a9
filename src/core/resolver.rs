//! Batch resolution under an error policy.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::batch::Batch;
use crate::core::store::ParameterStore;
use crate::core::types::ParameterName;
use crate::error::StoreError;

/// What to do when the store fails or cannot resolve names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Any call failure or invalid name aborts the run.
    #[default]
    Strict,
    /// Failures become warnings; affected variables keep their placeholders.
    Tolerant,
}

impl ErrorPolicy {
    /// `--no-fail` selects the tolerant policy.
    pub fn from_no_fail(no_fail: bool) -> Self {
        if no_fail {
            Self::Tolerant
        } else {
            Self::Strict
        }
    }
}

/// A failure the tolerant policy downgraded.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The call for a whole batch failed.
    CallFailed {
        error: StoreError,
        names: Vec<ParameterName>,
    },
    /// The store could not resolve these names.
    InvalidParameters(Vec<ParameterName>),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CallFailed { error, names } => {
                write!(f, "{} (unresolved: {})", error, names.join(", "))
            }
            Warning::InvalidParameters(names) => {
                write!(f, "{}", StoreError::InvalidParameters(names.clone()))
            }
        }
    }
}

/// Values resolved for one batch, plus the failures that were tolerated.
#[derive(Debug, Default)]
pub struct Resolution {
    pub found: BTreeMap<ParameterName, Zeroizing<String>>,
    pub warnings: Vec<Warning>,
}

/// Fetch one batch and apply `policy` to its failures.
///
/// # Errors
///
/// Under `ErrorPolicy::Strict`, returns the call error, or
/// `StoreError::InvalidParameters` naming every unresolved name.
pub fn resolve_batch(
    store: &dyn ParameterStore,
    batch: &Batch,
    decrypt: bool,
    policy: ErrorPolicy,
) -> Result<Resolution, StoreError> {
    let response = match store.get_parameters(batch, decrypt) {
        Ok(response) => response,
        Err(error) if policy == ErrorPolicy::Tolerant => {
            debug!(error = %error, names = batch.len(), "tolerating failed batch");
            return Ok(Resolution {
                found: BTreeMap::new(),
                warnings: vec![Warning::CallFailed {
                    error,
                    names: batch.clone(),
                }],
            });
        }
        Err(error) => return Err(error),
    };

    let invalid = response.invalid;
    let mut resolution = Resolution {
        found: response
            .found
            .into_iter()
            .map(|p| (p.name, Zeroizing::new(p.value)))
            .collect(),
        warnings: Vec::new(),
    };

    debug!(
        requested = batch.len(),
        found = resolution.found.len(),
        invalid = invalid.len(),
        "resolved batch"
    );

    if !invalid.is_empty() {
        match policy {
            ErrorPolicy::Strict => return Err(StoreError::InvalidParameters(invalid)),
            ErrorPolicy::Tolerant => {
                debug!(count = invalid.len(), "tolerating invalid parameters");
                resolution.warnings.push(Warning::InvalidParameters(invalid));
            }
        }
    }
    Ok(resolution)
}
