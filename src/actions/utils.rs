use clap::ArgMatches;
use tracing::trace;

use crate::{
    commands::params::{PARAMETER_FORMAT, PARAMETER_PRETTY},
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
};

/// Resolve the `--format` and `--pretty` parameters into an output format.
pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(String::as_str)
        .unwrap_or(crate::format::TEXT);
    let pretty = sub_matches.get_flag(PARAMETER_PRETTY);

    trace!("Format: {}", format);
    trace!("Pretty: {}", pretty);

    Ok(OutputFormat::from_string_with_options(
        format,
        OutputFormatOptions { pretty },
    )?)
}

/// Look up an environment variable of the running process.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
