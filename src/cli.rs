use clap::ArgMatches;

use crate::{
    actions,
    commands::{COMMAND_INSPECT, COMMAND_TOKEN, COMMAND_UPLOAD},
    error::CliError,
};

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some(m) => m.0.to_string(),
        None => "unknown".to_string(),
    }
}

/// Dispatch the parsed command line to its action.
pub async fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_UPLOAD, sub_matches)) => actions::upload::upload_file(sub_matches).await,
        Some((COMMAND_TOKEN, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_INSPECT, sub_matches)) => actions::token::inspect_token(sub_matches).await,
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(matches))),
    }
}
