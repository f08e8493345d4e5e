//! CLI command definitions and argument parsing.
//!
//! This module defines the commands and their arguments using the clap
//! builder API.

use clap::Command;

pub mod params;
pub mod token;
pub mod upload;

pub use params::{COMMAND_INSPECT, COMMAND_TOKEN, COMMAND_UPLOAD, PARAMETER_VERBOSE};

/// Build the complete command-line interface.
pub fn cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .subcommand(upload::upload_command())
        .subcommand(token::token_command())
}
