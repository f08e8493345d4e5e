//! Exit codes for the cdf-upload application
//!
//! Every failure class maps to its own code so that scripts wrapping the
//! uploader can tell a bad invocation from a rejected upload.

/// Exit codes for cdf-upload
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum UploadExitCode {
    /// Success (0) - The file was uploaded
    Success = exitcode::OK,

    /// Command line usage error (64) - Bad flag or malformed metadata
    UsageError = exitcode::USAGE,

    /// Data format error (65) - Output could not be rendered
    DataError = exitcode::DATAERR,

    /// Cannot open input file (66) - File not found, unreadable or not a regular file
    NoInput = exitcode::NOINPUT,

    /// Configuration error (78) - Missing or invalid environment variable
    ConfigError = exitcode::CONFIG,

    /// Authentication error (100) - The identity provider rejected the credentials
    AuthError = 100,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - CDF rejected the request
    ApiError = 102,

    /// Conflict (103) - A file with the same external id already exists
    Conflict = 103,
}

impl UploadExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            UploadExitCode::Success => "Success",
            UploadExitCode::UsageError => "Command line usage error",
            UploadExitCode::DataError => "Data format error",
            UploadExitCode::NoInput => "Cannot open input file",
            UploadExitCode::ConfigError => "Configuration error",
            UploadExitCode::AuthError => "Authentication error",
            UploadExitCode::NetworkError => "Network communication error",
            UploadExitCode::ApiError => "Remote API error",
            UploadExitCode::Conflict => "Resource already exists",
        }
    }
}

impl From<UploadExitCode> for i32 {
    fn from(code: UploadExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysexits_values() {
        assert_eq!(UploadExitCode::Success.code(), 0);
        assert_eq!(UploadExitCode::UsageError.code(), 64);
        assert_eq!(UploadExitCode::NoInput.code(), 66);
        assert_eq!(UploadExitCode::ConfigError.code(), 78);
    }

    #[test]
    fn test_custom_codes_are_distinct() {
        let codes: Vec<i32> = [
            UploadExitCode::AuthError,
            UploadExitCode::NetworkError,
            UploadExitCode::ApiError,
            UploadExitCode::Conflict,
        ]
        .iter()
        .map(|c| i32::from(*c))
        .collect();
        assert_eq!(codes, vec![100, 101, 102, 103]);
    }
}
