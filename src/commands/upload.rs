//! Upload command definition.

use crate::commands::params::{
    data_set_id_parameter, external_id_parameter, file_parameter, format_parameter,
    format_pretty_parameter, instance_external_id_parameter, instance_space_parameter,
    metadata_parameter, mime_type_parameter, name_parameter, source_parameter, COMMAND_UPLOAD,
};
use clap::Command;

/// Create the upload command.
pub fn upload_command() -> Command {
    Command::new(COMMAND_UPLOAD)
        .about("Upload a local file to CDF")
        .long_about(
            "Upload a local file to CDF.\n\n\
             Credentials are read from CDF_PROJECT, IDP_TENANT_ID, IDP_CLIENT_ID and \
             IDP_CLIENT_SECRET. CDF_CLUSTER selects the cluster (default: api).",
        )
        .arg(file_parameter())
        .arg(name_parameter())
        .arg(external_id_parameter())
        .arg(data_set_id_parameter())
        .arg(mime_type_parameter())
        .arg(metadata_parameter())
        .arg(source_parameter())
        .arg(instance_space_parameter())
        .arg(instance_external_id_parameter())
        .arg(format_parameter())
        .arg(format_pretty_parameter())
}
