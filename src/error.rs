//! Error types.
//!
//! Every failure is fatal once it reaches `main`, which prints it with the
//! tool prefix and exits with status 1. Store failures that the tolerant
//! policy downgrades never become an `Error`; see `core::resolver::Warning`.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pattern compilation and evaluation failures.
#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    /// The pattern text could not be compiled.
    #[error("parsing template: {message} (at offset {offset})")]
    Parse { message: String, offset: usize },

    /// The pattern failed while evaluating one variable.
    #[error("determining name of parameter for {variable}: {message}")]
    Eval { variable: String, message: String },
}

/// Configuration failures detected before any resolution work.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no command specified")]
    NoCommand,

    #[error("invalid batch size {size}: must be between 1 and {max}")]
    InvalidBatchSize { size: i64, max: usize },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine AWS region: set AWS_REGION or AWS_DEFAULT_REGION")]
    NoRegion,

    #[error("SSM support not compiled. Rebuild with: cargo install ssm-env --features aws")]
    StoreUnavailable,
}

/// Parameter store failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The remote call itself failed (network, auth, throttling).
    #[error("fetching parameters: {0}")]
    Call(String),

    /// The store answered but could not resolve some names.
    #[error("invalid parameters: {}", .0.join(", "))]
    InvalidParameters(Vec<String>),
}

/// Failures handing control to the target command.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("command not found: {command}")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to execute {command}: {source}")]
    Exec {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
