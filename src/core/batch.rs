//! Partitioning parameter names into store-sized batches.

use crate::core::constants::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use crate::core::types::ParameterName;
use crate::error::ConfigError;

/// Validated number of names per store call, `1..=MAX_BATCH_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSize(usize);

impl BatchSize {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBatchSize` outside `1..=MAX_BATCH_SIZE`.
    pub fn new(size: i64) -> Result<Self, ConfigError> {
        match usize::try_from(size) {
            Ok(n) if (1..=MAX_BATCH_SIZE).contains(&n) => Ok(Self(n)),
            _ => Err(ConfigError::InvalidBatchSize {
                size,
                max: MAX_BATCH_SIZE,
            }),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(DEFAULT_BATCH_SIZE)
    }
}

/// One group of names sent in a single store call.
pub type Batch = Vec<ParameterName>;

/// Split `names` into contiguous batches of at most `size` names.
///
/// Produces `ceil(len / size)` batches; only the last may be short.
pub fn plan(names: &[ParameterName], size: BatchSize) -> Vec<Batch> {
    names.chunks(size.get()).map(<[_]>::to_vec).collect()
}
