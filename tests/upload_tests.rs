//! Integration tests for the upload command.
//!
//! Every case here fails before the first request would be sent, so the
//! tests need no network and no CDF project.

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::io::Write;

    const CREDENTIAL_VARIABLES: [&str; 4] = [
        "CDF_PROJECT",
        "IDP_TENANT_ID",
        "IDP_CLIENT_ID",
        "IDP_CLIENT_SECRET",
    ];

    /// A command with all credential variables set to dummy values.
    fn command_with_credentials() -> Command {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();
        cmd.env("CDF_PROJECT", "publicdata")
            .env("IDP_TENANT_ID", "00000000-0000-0000-0000-000000000000")
            .env("IDP_CLIENT_ID", "client")
            .env("IDP_CLIENT_SECRET", "secret")
            .env_remove("CDF_CLUSTER")
            .env_remove("IDP_TOKEN_URL")
            .env_remove("IDP_SCOPES")
            .env_remove("CDF_UPLOAD_FORMAT");
        cmd
    }

    fn command_without_credentials() -> Command {
        let mut cmd = Command::cargo_bin("cdf-upload").unwrap();
        for name in CREDENTIAL_VARIABLES {
            cmd.env_remove(name);
        }
        cmd
    }

    fn temp_file() -> tempfile::NamedTempFile {
        let mut temp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp, "timestamp,value").unwrap();
        temp
    }

    /// Each required variable, when absent, is named in the error and the
    /// run exits with the configuration error code.
    #[test]
    fn test_missing_credential_is_named() {
        let temp = temp_file();
        for missing in CREDENTIAL_VARIABLES {
            let mut cmd = command_with_credentials();
            cmd.env_remove(missing).arg("upload").arg(temp.path());

            cmd.assert()
                .failure()
                .code(78)
                .stderr(predicate::str::contains("missing credential"))
                .stderr(predicate::str::contains(missing));
        }
    }

    #[test]
    fn test_empty_credential_counts_as_missing() {
        let temp = temp_file();
        let mut cmd = command_with_credentials();
        cmd.env("IDP_CLIENT_ID", "").arg("upload").arg(temp.path());

        cmd.assert()
            .failure()
            .code(78)
            .stderr(predicate::str::contains("IDP_CLIENT_ID"));
    }

    #[test]
    fn test_missing_file_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = command_with_credentials();
        cmd.arg("upload").arg(dir.path().join("nope.pdf"));

        cmd.assert()
            .failure()
            .code(66)
            .stderr(predicate::str::contains("cannot read file"))
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut cmd = command_with_credentials();
        cmd.arg("upload").arg(dir.path());

        cmd.assert()
            .failure()
            .code(66)
            .stderr(predicate::str::contains("is not a regular file"));
    }

    /// Malformed metadata is reported even with no credentials in the
    /// environment, because arguments are validated first.
    #[test]
    fn test_malformed_metadata_fails_before_credentials() {
        let temp = temp_file();
        let mut cmd = command_without_credentials();
        cmd.arg("upload")
            .arg(temp.path())
            .arg("--metadata")
            .arg("{not valid json");

        cmd.assert()
            .failure()
            .code(64)
            .stderr(predicate::str::contains("metadata is not valid JSON"))
            .stderr(predicate::str::contains("missing credential").not());
    }

    #[test]
    fn test_metadata_must_be_an_object() {
        let temp = temp_file();
        let mut cmd = command_without_credentials();
        cmd.arg("upload").arg(temp.path()).arg("--metadata").arg("[1, 2]");

        cmd.assert()
            .failure()
            .code(64)
            .stderr(predicate::str::contains("must be a JSON object"));
    }

    #[test]
    fn test_non_integer_data_set_id_is_a_usage_error() {
        let temp = temp_file();
        let mut cmd = command_without_credentials();
        cmd.arg("upload").arg(temp.path()).arg("--data-set-id").arg("42x");

        cmd.assert()
            .failure()
            .code(64)
            .stderr(predicate::str::contains("--data-set-id"));
    }

    #[test]
    fn test_missing_file_argument_is_a_usage_error() {
        let mut cmd = command_without_credentials();
        cmd.arg("upload");

        cmd.assert()
            .failure()
            .code(64)
            .stderr(predicate::str::contains("<FILE>"));
    }

    #[test]
    fn test_invalid_cluster_is_a_configuration_error() {
        let temp = temp_file();
        let mut cmd = command_with_credentials();
        cmd.env("CDF_CLUSTER", "bad host/")
            .arg("upload")
            .arg(temp.path());

        cmd.assert()
            .failure()
            .code(78)
            .stderr(predicate::str::contains("invalid cluster name"));
    }
}
