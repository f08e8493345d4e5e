use clap::ArgMatches;
use tracing::trace;

use crate::{
    actions::utils::{get_format_parameter_value, process_env},
    cdf::CdfApiClient,
    credentials::Credentials,
    error::CliError,
    format::OutputFormatter,
};

/// Obtain a token and print what it grants access to.
///
/// This is the quickest way to check the environment before an upload.
pub async fn inspect_token(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing \"token inspect\" command...");

    let format = get_format_parameter_value(sub_matches)?;
    let credentials = Credentials::from_lookup(process_env)?;
    let api = CdfApiClient::new(&credentials)?;

    let inspection = api.inspect_token().await?;
    if !inspection
        .projects
        .iter()
        .any(|p| p.project_url_name == credentials.project())
    {
        tracing::warn!(
            "Token does not grant access to project {}",
            credentials.project()
        );
    }

    println!("{}", inspection.format(format)?);

    Ok(())
}
