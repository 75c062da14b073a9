//! Run command.
//!
//! Resolves parameter references in the current environment and replaces
//! this process with the target command.

use std::convert::Infallible;

use tracing::debug;

use crate::cli::{output, Cli};
use crate::core::config::{FileConfig, Settings};
use crate::core::constants::{DEFAULT_REGION_ENV, REGION_ENV};
use crate::core::engine::{self, Outcome};
use crate::core::environ::{OsEnviron, Snapshot};
use crate::core::launch;
use crate::core::matcher::Matcher;
use crate::core::store::ParameterStore;
use crate::error::{ConfigError, Result};

/// Resolve the environment and exec `cli.command`.
///
/// Only returns on failure; nothing is launched on any error path.
pub fn execute(cli: Cli) -> Result<Infallible> {
    if cli.command.is_empty() {
        return Err(ConfigError::NoCommand.into());
    }

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::merge(cli.overrides(), file);
    let options = settings.options()?;
    let matcher = Matcher::new(&settings.template)?;
    debug!(?options, "settings resolved");

    let snapshot = Snapshot::capture(&OsEnviron);
    let default_region = snapshot
        .get(DEFAULT_REGION_ENV)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    let mut outcome = resolve(&matcher, snapshot, options, default_region.as_deref())?;
    for warning in &outcome.warnings {
        output::warn(&warning.to_string());
    }
    if let Some(region) = &default_region {
        outcome.env.set(REGION_ENV, region);
    }

    let program = launch::find_program(&cli.command[0], &outcome.env)?;
    launch::exec(&program, &cli.command, &outcome.env)
}

fn resolve(
    matcher: &Matcher,
    snapshot: Snapshot,
    options: engine::Options,
    default_region: Option<&str>,
) -> Result<Outcome> {
    let plan = engine::plan(matcher, snapshot, options)?;
    if plan.is_empty() {
        debug!("no indirections found");
        return Ok(plan.finish());
    }

    let store = connect(default_region)?;
    Ok(plan.resolve(store.as_ref())?)
}

#[cfg(feature = "aws")]
fn connect(default_region: Option<&str>) -> Result<Box<dyn ParameterStore>> {
    let ssm = crate::core::store::ssm::Ssm::connect(default_region)?;
    Ok(Box::new(ssm))
}

#[cfg(not(feature = "aws"))]
fn connect(_default_region: Option<&str>) -> Result<Box<dyn ParameterStore>> {
    Err(ConfigError::StoreUnavailable.into())
}
