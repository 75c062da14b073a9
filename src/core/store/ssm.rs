//! AWS Systems Manager Parameter Store backend.
//!
//! Enable with `--features aws` (on by default).
//!
//! Credentials come from the SDK's default provider chain. The region is
//! taken from `AWS_DEFAULT_REGION` when present, then from the SDK's own
//! chain (`AWS_REGION`, shared profile, instance metadata).

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::error::DisplayErrorContext;
use tracing::{debug, trace};

use super::{Parameter, ParameterStore, Parameters};
use crate::core::types::ParameterName;
use crate::error::{ConfigError, Result, StoreError};

/// SSM client bound to a single-threaded runtime.
///
/// The SDK is async; each call is driven to completion with `block_on`
/// so callers see a plain blocking API.
pub struct Ssm {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_ssm::Client,
}

impl Ssm {
    /// Discover the region and build a client.
    ///
    /// # Arguments
    ///
    /// * `default_region` - Value of `AWS_DEFAULT_REGION`, if set
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoRegion` if no region can be found.
    pub fn connect(default_region: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let explicit = default_region
            .filter(|r| !r.is_empty())
            .map(|r| Region::new(r.to_string()));

        let client = runtime.block_on(async {
            let region = RegionProviderChain::first_try(explicit)
                .or_default_provider()
                .region()
                .await
                .ok_or(ConfigError::NoRegion)?;
            debug!(region = %region, "using AWS region");

            let config = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            Ok::<_, ConfigError>(aws_sdk_ssm::Client::new(&config))
        })?;

        Ok(Self { runtime, client })
    }
}

impl std::fmt::Debug for Ssm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ssm").finish_non_exhaustive()
    }
}

impl ParameterStore for Ssm {
    fn get_parameters(
        &self,
        names: &[ParameterName],
        decrypt: bool,
    ) -> std::result::Result<Parameters, StoreError> {
        trace!(count = names.len(), decrypt, "GetParameters");

        let output = self
            .runtime
            .block_on(
                self.client
                    .get_parameters()
                    .set_names(Some(names.to_vec()))
                    .with_decryption(decrypt)
                    .send(),
            )
            .map_err(|e| StoreError::Call(DisplayErrorContext(&e).to_string()))?;

        let found = output
            .parameters()
            .iter()
            .filter_map(|p| {
                Some(Parameter {
                    name: p.name()?.to_string(),
                    value: p.value()?.to_string(),
                })
            })
            .collect();
        let invalid = output.invalid_parameters().to_vec();

        Ok(Parameters { found, invalid })
    }
}
