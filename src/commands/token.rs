//! Token command definitions.

use crate::commands::params::{format_parameter, format_pretty_parameter, COMMAND_INSPECT, COMMAND_TOKEN};
use clap::Command;

/// Create the token command with all its subcommands.
pub fn token_command() -> Command {
    Command::new(COMMAND_TOKEN)
        .about("Credential checks")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_INSPECT)
                .about("Obtain a token and show the subject and projects it grants access to")
                .arg(format_parameter())
                .arg(format_pretty_parameter()),
        )
}
