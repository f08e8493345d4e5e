use cdf_upload::{
    cli::execute_command,
    commands::{cli_command, PARAMETER_VERBOSE},
    exit_codes::UploadExitCode,
};
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = match cli_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(UploadExitCode::UsageError.code());
            }
        },
    };

    // Intialize the logging subsystem; RUST_LOG wins over --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(&matches).await {
        let code = e.exit_code();
        tracing::debug!("Exiting with {} ({})", code.code(), code.message());
        eprintln!("ERROR: {}", e);
        std::process::exit(code.code());
    }
}
