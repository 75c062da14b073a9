//! Command-line interface.

pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::core::config::Overrides;

/// Resolve SSM parameter references in the environment, then exec a command.
#[derive(Parser, Debug)]
#[command(
    name = "ssm-env",
    about = "Resolve SSM parameter references in the environment, then exec a command",
    version,
    after_help = "Example:\n  DB_PASSWORD=ssm://prod/db/password ssm-env --with-decryption ./server"
)]
pub struct Cli {
    /// Template that maps a variable to a parameter name.
    /// An empty result means the variable is not a parameter.
    #[arg(long, env = "SSM_ENV_TEMPLATE", value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Decrypt SecureString parameters and set the plaintext
    #[arg(
        long,
        env = "SSM_ENV_WITH_DECRYPTION",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub with_decryption: bool,

    /// Warn instead of failing when parameters can't be retrieved
    #[arg(
        long,
        env = "SSM_ENV_NO_FAIL",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub no_fail: bool,

    /// Parameters per GetParameters call (1-10)
    #[arg(
        long,
        env = "SSM_ENV_BATCH_SIZE",
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub batch_size: Option<i64>,

    /// TOML file with defaults for the options above
    #[arg(long, env = "SSM_ENV_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show debug output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Command and arguments to run
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Option values given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            template: self.template.clone(),
            with_decryption: self.with_decryption,
            no_fail: self.no_fail,
            batch_size: self.batch_size,
        }
    }
}
