//! Tests for the `ssm-env` binary.

use predicates::prelude::*;

mod support;
use support::*;

#[test]
fn test_no_command_prints_usage_and_exits_1() {
    let t = Test::new();
    let output = t.cmd().output().unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "Usage");
}

#[cfg(unix)]
#[test]
fn test_plain_environment_passes_through() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("BAR", "plain")
        .args(["sh", "-c", "echo \"$BAR\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "plain\n");
    assert_eq!(stderr(&output), "");
}

#[cfg(unix)]
#[test]
fn test_exit_code_passthrough() {
    let t = Test::new();
    let output = t.cmd().args(["sh", "-c", "exit 42"]).output().unwrap();
    assert_eq!(output.status.code(), Some(42));
}

#[cfg(unix)]
#[test]
fn test_arguments_are_forwarded() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["sh", "-c", "echo \"$1-$2\"", "sh", "--no-fail", "two"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "--no-fail-two\n");
}

#[test]
fn test_help_lists_flags() {
    let t = Test::new();
    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--with-decryption"))
        .stdout(predicate::str::contains("--no-fail"))
        .stdout(predicate::str::contains("--batch-size"));
}

#[cfg(unix)]
#[test]
fn test_indirection_free_run_is_silent() {
    let t = Test::new();
    t.cmd()
        .env("GREETING", "ssm:/not-quite")
        .args(["sh", "-c", "printf %s \"$GREETING\""])
        .assert()
        .success()
        .stdout("ssm:/not-quite")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_command_not_found() {
    let t = Test::new();
    let output = t
        .cmd()
        .arg("definitely-not-a-real-command-4f1c")
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(
        &output,
        "ssm-env: command not found: definitely-not-a-real-command-4f1c",
    );
}

#[test]
fn test_invalid_template_is_fatal() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--template", "{{ if .Value }}", "true"])
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "ssm-env: parsing template");
}

#[test]
fn test_batch_size_out_of_range() {
    let t = Test::new();
    for size in ["0", "11"] {
        let output = t.cmd().args(["--batch-size", size, "true"]).output().unwrap();
        assert_fatal(&output);
        assert_stderr_contains(&output, "invalid batch size");
    }
}

#[test]
fn test_batch_size_from_env() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("SSM_ENV_BATCH_SIZE", "12")
        .arg("true")
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "invalid batch size 12");
}

#[test]
fn test_evaluation_error_is_fatal_even_with_no_fail() {
    let t = Test::new();
    let template = r#"{{ if hasPrefix .Value "!" }}{{ toUpper }}{{ end }}"#;
    for extra in [&[][..], &["--no-fail"][..]] {
        let output = t
            .cmd()
            .env("BROKEN", "!boom")
            .args(["--template", template])
            .args(extra)
            .arg("true")
            .output()
            .unwrap();
        assert_fatal(&output);
        assert_stderr_contains(&output, "determining name of parameter for BROKEN");
    }
}

#[cfg(unix)]
#[test]
fn test_template_that_never_matches_needs_no_store() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("FOO", "ssm://app/secret")
        .args(["--template", "", "sh", "-c", "echo \"$FOO\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "ssm://app/secret\n");
}

#[cfg(unix)]
#[test]
fn test_default_region_is_exported() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("AWS_DEFAULT_REGION", "eu-west-1")
        .args(["sh", "-c", "echo \"$AWS_REGION\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "eu-west-1\n");
}

#[cfg(feature = "aws")]
#[test]
fn test_missing_region_is_fatal() {
    let t = Test::new();
    let output = t
        .cmd()
        .env("FOO", "ssm://app/secret")
        .args(["--no-fail", "true"])
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "could not determine AWS region");
}

#[cfg(all(unix, feature = "aws"))]
#[test]
fn test_strict_call_failure_never_launches() {
    let t = Test::new();
    let output = t
        .unreachable_store_cmd()
        .env("FOO", "ssm://app/secret")
        .args(["sh", "-c", "echo launched"])
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "ssm-env: fetching parameters");
    assert_eq!(stdout(&output), "");
}

#[cfg(all(unix, feature = "aws"))]
#[test]
fn test_tolerant_call_failure_keeps_placeholders() {
    let t = Test::new();
    let output = t
        .unreachable_store_cmd()
        .env("FOO", "ssm://app/secret")
        .env("BAR", "plain")
        .args(["--no-fail", "sh", "-c", "echo \"$FOO $BAR\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "ssm://app/secret plain\n");
    assert_stderr_contains(&output, "ssm-env: warning: fetching parameters");
    assert_stderr_contains(&output, "(unresolved: app/secret)");
}

#[cfg(all(unix, feature = "aws"))]
#[test]
fn test_resolved_values_reach_the_command() {
    let t = Test::new();
    let stub = SsmStub::start(&[("app/secret", "s3cr3t")], &[]);
    let output = t
        .store_cmd(&stub.url())
        .env("FOO", "ssm://app/secret")
        .env("ALIAS", "ssm://app/secret")
        .env("BAR", "plain")
        .args(["sh", "-c", "echo \"$FOO $ALIAS $BAR\""])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "s3cr3t s3cr3t plain\n");
    assert_eq!(stderr(&output), "");
}

#[cfg(all(unix, feature = "aws"))]
#[test]
fn test_strict_invalid_parameter_is_fatal() {
    let t = Test::new();
    let stub = SsmStub::start(&[], &["app/missing"]);
    let output = t
        .store_cmd(&stub.url())
        .env("FOO", "ssm://app/missing")
        .args(["sh", "-c", "echo launched"])
        .output()
        .unwrap();
    assert_fatal(&output);
    assert_stderr_contains(&output, "ssm-env: invalid parameters: app/missing");
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_negative_batch_size_is_a_config_error() {
    let t = Test::new();
    t.cmd()
        .args(["--batch-size", "-1", "true"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "ssm-env: invalid batch size -1: must be between 1 and 10",
        ));
}

#[test]
fn test_malformed_flag_value_exits_1_with_prefix() {
    let t = Test::new();
    t.cmd()
        .args(["--batch-size", "ten", "true"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ssm-env: invalid value 'ten'"));
}

#[test]
fn test_boolean_env_accepts_numeric_values() {
    let t = Test::new();
    t.cmd()
        .env("SSM_ENV_NO_FAIL", "1")
        .env("SSM_ENV_WITH_DECRYPTION", "yes")
        .arg("true")
        .assert()
        .success();
}

#[test]
fn test_version_exits_0() {
    let t = Test::new();
    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ssm-env"));
}
