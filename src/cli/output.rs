//! Operator-facing messages.
//!
//! Everything goes to stderr so the launched command's stdout stays clean.
//! Color respects NO_COLOR and whether stderr is a terminal.

use console::style;

use crate::core::constants::TOOL_NAME;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a fatal error.
///
/// Example: `ssm-env: invalid parameters: prod/db`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style(format!("{}:", TOOL_NAME)).for_stderr().red().bold(), msg);
    } else {
        eprintln!("{}: {}", TOOL_NAME, msg);
    }
}

/// Print a tolerated failure.
///
/// Example: `ssm-env: warning: invalid parameters: prod/db`
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!(
            "{} {} {}",
            style(format!("{}:", TOOL_NAME)).for_stderr().yellow().bold(),
            style("warning:").for_stderr().yellow(),
            msg
        );
    } else {
        eprintln!("{}: warning: {}", TOOL_NAME, msg);
    }
}

/// Print help text, used when no command is given.
pub fn usage() {
    use clap::CommandFactory;

    let mut cmd = crate::cli::Cli::command();
    eprintln!("{}", cmd.render_help());
}
