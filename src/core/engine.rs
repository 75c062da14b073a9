//! Resolution pipeline.
//!
//! ```text
//! Snapshot ──match──▶ Binding ──plan──▶ Plan ──resolve(store)──▶ Outcome
//! ```
//!
//! Matching and planning never touch the store, so a [`Plan`] with no
//! batches can be finished without building a client at all. Resolution
//! runs batches one at a time, in plan order; a strict-policy failure
//! drops the partially resolved environment.

use tracing::{debug, info};

use crate::core::batch::{self, Batch, BatchSize};
use crate::core::binding::Binding;
use crate::core::environ::Snapshot;
use crate::core::matcher::Matcher;
use crate::core::resolver::{self, ErrorPolicy, Warning};
use crate::core::store::ParameterStore;
use crate::core::substitute::{self, ResolvedEnvironment};
use crate::error::{StoreError, TemplateError};

/// Resolution settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Request decryption of `SecureString` parameters.
    pub decrypt: bool,
    pub policy: ErrorPolicy,
    pub batch_size: BatchSize,
}

/// Matched and batched, but not yet resolved.
#[derive(Debug)]
pub struct Plan {
    binding: Binding,
    batches: Vec<Batch>,
    env: ResolvedEnvironment,
    options: Options,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct Outcome {
    pub env: ResolvedEnvironment,
    pub warnings: Vec<Warning>,
}

/// Match every variable in `snapshot` and partition the distinct names.
///
/// # Errors
///
/// Returns `TemplateError::Eval` if the pattern fails for any variable,
/// regardless of the error policy.
pub fn plan(
    matcher: &Matcher,
    snapshot: Snapshot,
    options: Options,
) -> Result<Plan, TemplateError> {
    let binding = Binding::build(matcher, &snapshot)?;
    let batches = batch::plan(&binding.names(), options.batch_size);
    debug!(
        parameters = binding.len(),
        batches = batches.len(),
        batch_size = options.batch_size.get(),
        "planned resolution"
    );

    Ok(Plan {
        binding,
        batches,
        env: ResolvedEnvironment::new(snapshot),
        options,
    })
}

impl Plan {
    /// `true` when no variable is an indirection.
    pub fn is_empty(&self) -> bool {
        self.binding.is_empty()
    }

    /// Finish without contacting a store. Every indirection keeps its placeholder.
    pub fn finish(self) -> Outcome {
        Outcome {
            env: self.env,
            warnings: Vec::new(),
        }
    }

    /// Resolve every batch against `store` and substitute the results.
    ///
    /// # Errors
    ///
    /// Under the strict policy, the first call failure or invalid batch
    /// aborts and discards the partially resolved environment.
    pub fn resolve(self, store: &dyn ParameterStore) -> Result<Outcome, StoreError> {
        let Plan {
            binding,
            batches,
            mut env,
            options,
        } = self;
        let mut warnings = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            debug!(
                batch = index + 1,
                of = batches.len(),
                size = batch.len(),
                "resolving batch"
            );
            let resolution =
                resolver::resolve_batch(store, batch, options.decrypt, options.policy)?;
            substitute::apply(&resolution.found, &binding, &mut env);
            warnings.extend(resolution.warnings);
        }

        info!(
            parameters = binding.len(),
            substituted = env.overrides().count(),
            warnings = warnings.len(),
            "resolution complete"
        );
        Ok(Outcome { env, warnings })
    }
}
