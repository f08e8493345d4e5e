#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use std::process::Command;

    #[test]
    fn test_cli_help_output() {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();

        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Options:"));
        assert!(help_output.contains("Commands:"));
        assert!(help_output.contains("upload"));
        assert!(help_output.contains("token"));
        assert!(help_output.contains("-v, --verbose"));
        assert!(help_output.contains("-V, --version"));
    }

    #[test]
    fn test_upload_help_lists_every_flag() {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();
        let assert_result = cmd.arg("upload").arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        for flag in [
            "<FILE>",
            "--external-id",
            "--data-set-id",
            "--mime-type",
            "--metadata",
            "--source",
            "--name",
            "--instance-space",
            "--instance-external-id",
            "--format",
        ] {
            assert!(help_output.contains(flag), "missing {} in:\n{}", flag, help_output);
        }
        assert!(help_output.contains("CDF_PROJECT"));
    }

    #[test]
    fn test_token_inspect_help() {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();
        let assert_result = cmd
            .arg("token")
            .arg("inspect")
            .arg("--help")
            .assert()
            .success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);
        assert!(help_output.contains("Obtain a token"));
    }

    #[test]
    fn test_cli_version() {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();
        let assert_result = cmd.arg("--version").assert().success();
        let output = assert_result.get_output();
        let version_output = String::from_utf8_lossy(&output.stdout);

        assert!(version_output.contains("cdf-upload"));
        assert!(version_output.contains('.'));
    }
}
