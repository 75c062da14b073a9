//! Remote parameter store access.
//!
//! Provides the store abstraction with an SSM implementation and an
//! in-memory one.
//!
//! ## Adding a New Store
//!
//! 1. Implement the `ParameterStore` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

mod memory;

#[cfg(feature = "aws")]
pub mod ssm;

pub use memory::MemoryStore;

use crate::core::types::ParameterName;
use crate::error::StoreError;

/// A resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: ParameterName,
    pub value: String,
}

/// Store response for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Names the store resolved, with their values.
    pub found: Vec<Parameter>,
    /// Names the store reported as missing or inaccessible.
    pub invalid: Vec<ParameterName>,
}

/// Parameter store trait.
///
/// Implementations perform one blocking call per invocation. Retries,
/// timeouts and credentials are the implementation's concern.
pub trait ParameterStore {
    /// Fetch a batch of parameters.
    ///
    /// # Arguments
    ///
    /// * `names` - At most `MAX_BATCH_SIZE` distinct names
    /// * `decrypt` - Decrypt `SecureString` values
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Call` if the call itself fails. Names that the
    /// store could not resolve are reported in `Parameters::invalid`, not
    /// as an error.
    fn get_parameters(
        &self,
        names: &[ParameterName],
        decrypt: bool,
    ) -> Result<Parameters, StoreError>;
}
