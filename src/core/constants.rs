//! Constants used throughout ssm-env.
//!
//! Centralizes magic strings and configuration values.

/// Name used to prefix every operator-facing message.
pub const TOOL_NAME: &str = "ssm-env";

/// Pattern used when none is configured.
///
/// Matches values of the form `ssm://<name>` and yields `<name>`.
pub const DEFAULT_TEMPLATE: &str =
    r#"{{ if hasPrefix .Value "ssm://" }}{{ trimPrefix .Value "ssm://" }}{{ end }}"#;

/// Hard upper bound on names per `GetParameters` call.
///
/// <https://docs.aws.amazon.com/systems-manager/latest/APIReference/API_GetParameters.html>
pub const MAX_BATCH_SIZE: usize = 10;

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = MAX_BATCH_SIZE;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SSM_ENV_LOG";

/// Region variable honored ahead of the SDK's own provider chain.
pub const DEFAULT_REGION_ENV: &str = "AWS_DEFAULT_REGION";

/// Region variable read by the SDK.
pub const REGION_ENV: &str = "AWS_REGION";
