use clap::ArgMatches;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

use crate::{
    actions::utils::{get_format_parameter_value, process_env},
    cdf::ApiError,
    commands::params::{
        PARAMETER_DATA_SET_ID, PARAMETER_EXTERNAL_ID, PARAMETER_FILE,
        PARAMETER_INSTANCE_EXTERNAL_ID, PARAMETER_INSTANCE_SPACE, PARAMETER_METADATA,
        PARAMETER_MIME_TYPE, PARAMETER_NAME, PARAMETER_SOURCE,
    },
    credentials::Credentials,
    error::CliError,
    format::OutputFormatter,
    metadata::parse_metadata,
    model::{InstanceId, UploadRequest, UploadResult, DEFAULT_SOURCE},
    uploader::{CdfUploader, FileUploader, LocalFile},
};

/// Build the upload request from the parsed `upload` arguments.
///
/// Nothing outside the arguments is touched, so a malformed `--metadata`
/// value fails here before any credential is read.
pub fn request_from_matches(sub_matches: &ArgMatches) -> Result<UploadRequest, CliError> {
    let file_path = sub_matches
        .get_one::<PathBuf>(PARAMETER_FILE)
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_FILE.to_string()))?
        .clone();

    let optional = |name: &str| sub_matches.get_one::<String>(name).cloned();

    // Sent as given; CDF accepts MIME types the `mime` crate does not
    let mime_type = match optional(PARAMETER_MIME_TYPE) {
        Some(raw) if raw.trim().is_empty() => {
            return Err(CliError::InvalidArgument {
                name: PARAMETER_MIME_TYPE.to_string(),
                reason: "must not be empty".to_string(),
            })
        }
        Some(raw) => {
            if let Err(e) = raw.parse::<mime::Mime>() {
                warn!("MIME type {:?} is not a standard media type: {}", raw, e);
            }
            Some(raw)
        }
        None => None,
    };

    let metadata = match sub_matches.get_one::<String>(PARAMETER_METADATA) {
        Some(raw) => Some(parse_metadata(raw)?),
        None => None,
    };

    let instance = match (
        optional(PARAMETER_INSTANCE_SPACE),
        optional(PARAMETER_INSTANCE_EXTERNAL_ID),
    ) {
        (Some(space), Some(external_id)) => Some(InstanceId { space, external_id }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(CliError::MissingRequiredArgument(
                PARAMETER_INSTANCE_EXTERNAL_ID.to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(CliError::MissingRequiredArgument(
                PARAMETER_INSTANCE_SPACE.to_string(),
            ))
        }
    };

    Ok(UploadRequest {
        file_path,
        name: optional(PARAMETER_NAME),
        external_id: optional(PARAMETER_EXTERNAL_ID),
        data_set_id: sub_matches.get_one::<i64>(PARAMETER_DATA_SET_ID).copied(),
        mime_type,
        metadata,
        source: optional(PARAMETER_SOURCE).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        instance,
    })
}

/// Run one upload: arguments, then credentials, then the client, then the file.
///
/// `lookup` reads environment variables and `connect` builds the uploader
/// from the credentials, which lets tests run the whole sequence without a
/// network.
pub async fn run_upload<L, C, U>(
    sub_matches: &ArgMatches,
    lookup: L,
    connect: C,
) -> Result<UploadResult, CliError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&Credentials) -> Result<U, ApiError>,
    U: FileUploader,
{
    let request = request_from_matches(sub_matches)?;
    debug!("Upload request: {:?}", request);

    let credentials = Credentials::from_lookup(lookup)?;
    let uploader = connect(&credentials)?;

    let file = LocalFile::open(&request.file_path).await?;
    let result = uploader.upload(&request, file).await?;

    debug!("Uploaded file {} to project {}", result.id, credentials.project());
    Ok(result)
}

/// Execute the `upload` command against CDF and print the result.
pub async fn upload_file(sub_matches: &ArgMatches) -> Result<(), CliError> {
    trace!("Executing \"upload\" command...");

    let format = get_format_parameter_value(sub_matches)?;
    let result = run_upload(sub_matches, process_env, CdfUploader::connect).await?;

    println!("{}", result.format(format)?);

    Ok(())
}
