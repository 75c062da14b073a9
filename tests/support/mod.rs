//! Test support utilities for ssm-env integration tests.
//!
//! Provides an isolated command builder and assertion helpers.

#![allow(dead_code)]

pub mod assertions;
pub mod skip;
pub mod ssm_stub;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use ssm_stub::SsmStub;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test environment with an isolated home directory.
///
/// Each command starts from an empty environment plus `PATH`, so nothing
/// from the developer's shell (AWS profiles, `SSM_ENV_*` settings) leaks in.
pub struct Test {
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// Create an ssm-env command with a clean environment.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ssm-env").expect("failed to find ssm-env binary");
        cmd.env_clear();
        if let Some(path) = std::env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("NO_COLOR", "1");
        // Never fall through to instance metadata during tests.
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        cmd.env("AWS_CONFIG_FILE", self.home.path().join("aws-config"));
        cmd.env("AWS_SHARED_CREDENTIALS_FILE", self.home.path().join("aws-credentials"));
        cmd
    }

    /// Command whose SSM client talks to `endpoint`.
    ///
    /// Region and static credentials are set so the client always builds.
    pub fn store_cmd(&self, endpoint: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AWS_REGION", "us-east-1");
        cmd.env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE");
        cmd.env("AWS_SECRET_ACCESS_KEY", "secret");
        cmd.env("AWS_ENDPOINT_URL", endpoint);
        cmd.env("AWS_MAX_ATTEMPTS", "1");
        cmd
    }

    /// Command pointed at an SSM endpoint that refuses connections.
    pub fn unreachable_store_cmd(&self) -> Command {
        self.store_cmd("http://127.0.0.1:1")
    }

    /// Write a config file into the temp home and return its path.
    pub fn config_file(&self, contents: &str) -> std::path::PathBuf {
        let path = self.home.path().join("ssm-env.toml");
        std::fs::write(&path, contents).expect("failed to write config file");
        path
    }
}
