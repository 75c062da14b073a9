//! ssm-env - inject SSM Parameter Store values into a command's environment.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ssm_env::cli::{output, run, Cli};
use ssm_env::core::constants::LOG_ENV;
use ssm_env::error::{ConfigError, Error};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            output::error(&parse_error_message(&e));
            std::process::exit(1);
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ssm_env=debug")
        } else {
            EnvFilter::new("ssm_env=warn")
        }
    });

    let json = std::env::var("SSM_ENV_LOG_FORMAT").is_ok_and(|f| f == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .init();
    }

    match run::execute(cli) {
        Ok(never) => match never {},
        Err(Error::Config(ConfigError::NoCommand)) => output::usage(),
        Err(e) => output::error(&e.to_string()),
    }
    std::process::exit(1);
}

/// First line of a clap error, without clap's own `error:` prefix.
fn parse_error_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
