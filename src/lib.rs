//! Upload a single local file to Cognite Data Fusion.
//!
//! The crate authenticates with the OIDC client-credentials flow, creates
//! the file object (optionally attached to a data modeling node) and streams
//! the file content to the upload URL CDF returns.
//!
//! # Modules
//!
//! - `actions`: Execution of the CLI commands
//! - `auth`: OIDC client-credentials token provider
//! - `cdf`: CDF REST API client
//! - `commands`: CLI command and argument definitions
//! - `credentials`: Credentials read from the environment
//! - `format`: Output formatting
//! - `metadata`: Parsing of the `--metadata` JSON object
//! - `model`: Request, result and API data models
//! - `uploader`: The upload seam and its CDF implementation

pub mod actions;
pub mod auth;
pub mod cdf;
pub mod cli;
pub mod commands;
pub mod credentials;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod metadata;
pub mod model;
pub mod uploader;
