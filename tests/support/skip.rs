/// Skip a test if AWS credentials are not configured.
#[macro_export]
macro_rules! skip_without_aws {
    () => {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err() {
            eprintln!("SKIPPED: AWS_ACCESS_KEY_ID not set");
            return;
        }
        if std::env::var("SSM_ENV_TEST_PARAMETER").is_err() {
            eprintln!(
                "SKIPPED: SSM_ENV_TEST_PARAMETER not set (set to an existing parameter name)"
            );
            return;
        }
    };
}
