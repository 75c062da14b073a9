//! Handing control to the target command.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::core::substitute::ResolvedEnvironment;
use crate::error::{LaunchError, Result};

/// Find `program` on the resolved `PATH`.
///
/// Names containing a path separator are used as given.
///
/// # Errors
///
/// Returns `LaunchError::CommandNotFound` if nothing executable matches.
pub fn find_program(program: &str, env: &ResolvedEnvironment) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let path: OsString = env.get("PATH").map(OsString::from).unwrap_or_default();

    which::which_in(program, Some(path), cwd).map_err(|source| {
        LaunchError::CommandNotFound {
            command: program.to_string(),
            source,
        }
        .into()
    })
}

/// Build the command: inherited environment with resolved values layered on top.
///
/// `argv[0]` is kept as the name the caller typed.
fn command(program: &Path, argv: &[String], env: &ResolvedEnvironment) -> Command {
    let mut cmd = Command::new(program);
    if let Some((arg0, args)) = argv.split_first() {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(arg0);
        }
        #[cfg(not(unix))]
        let _ = arg0;
        cmd.args(args);
    }
    for (name, value) in env.overrides() {
        cmd.env(name, value);
    }
    cmd
}

/// Replace the current process with `program`.
///
/// Only returns on failure.
///
/// # Errors
///
/// Returns `LaunchError::Exec` if the image could not be replaced.
#[cfg(unix)]
pub fn exec(program: &Path, argv: &[String], env: &ResolvedEnvironment) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    debug!(program = %program.display(), args = argv.len(), "exec");
    let source = command(program, argv, env).exec();
    Err(LaunchError::Exec {
        command: program.display().to_string(),
        source,
    }
    .into())
}

/// Run `program` as a child and exit with its status.
///
/// Used where the process image cannot be replaced in place.
///
/// # Errors
///
/// Returns `LaunchError::Exec` if the child could not be started.
#[cfg(not(unix))]
pub fn exec(program: &Path, argv: &[String], env: &ResolvedEnvironment) -> Result<Infallible> {
    debug!(program = %program.display(), args = argv.len(), "spawn");
    let status = command(program, argv, env)
        .status()
        .map_err(|source| LaunchError::Exec {
            command: program.display().to_string(),
            source,
        })?;
    std::process::exit(status.code().unwrap_or(1));
}
