use thiserror::Error;

use crate::{
    auth::AuthError,
    cdf::ApiError,
    credentials::CredentialError,
    exit_codes::UploadExitCode,
    format::FormattingError,
    metadata::MetadataError,
    uploader::UploadError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Error when an argument value is present but unusable
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },
    /// Error when the `--metadata` value cannot be used
    #[error("Invalid metadata: {0}")]
    MetadataError(#[from] MetadataError),
    /// Error when the environment lacks a credential
    #[error("Configuration error: {0}")]
    CredentialError(#[from] CredentialError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    #[error("{0}")]
    UploadError(#[from] UploadError),
    #[error("{0}")]
    ApiError(#[from] ApiError),
}

fn api_exit_code(error: &ApiError) -> UploadExitCode {
    match error {
        ApiError::Auth(AuthError::AuthFailed { .. }) => UploadExitCode::AuthError,
        ApiError::Auth(AuthError::InvalidTokenResponse(_)) => UploadExitCode::AuthError,
        ApiError::Auth(AuthError::HttpError(_)) => UploadExitCode::NetworkError,
        ApiError::Network(_) => UploadExitCode::NetworkError,
        ApiError::Conflict { .. } => UploadExitCode::Conflict,
        ApiError::Remote { .. } | ApiError::UnexpectedResponse(_) => UploadExitCode::ApiError,
        ApiError::InvalidUrl(_) => UploadExitCode::ApiError,
        ApiError::Credentials(_) => UploadExitCode::ConfigError,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error
    ///
    /// - `UsageError` for bad arguments and malformed metadata
    /// - `ConfigError` for missing credentials
    /// - `NoInput` for files that cannot be read
    /// - `AuthError`, `NetworkError`, `ApiError` or `Conflict` for remote failures
    pub fn exit_code(&self) -> UploadExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => UploadExitCode::UsageError,
            CliError::MissingRequiredArgument(_) => UploadExitCode::UsageError,
            CliError::InvalidArgument { .. } => UploadExitCode::UsageError,
            CliError::MetadataError(_) => UploadExitCode::UsageError,
            CliError::CredentialError(_) => UploadExitCode::ConfigError,
            CliError::FormattingError(_) => UploadExitCode::DataError,
            CliError::UploadError(UploadError::FileSystem { .. }) => UploadExitCode::NoInput,
            CliError::UploadError(UploadError::NotAFile(_)) => UploadExitCode::NoInput,
            CliError::UploadError(UploadError::Api(e)) => api_exit_code(e),
            CliError::ApiError(e) => api_exit_code(e),
        }
    }
}
