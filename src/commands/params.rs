//! Shared command parameters for all CLI commands.
//!
//! Parameter names live here so the command definitions and the actions
//! that read the parsed values agree on them.

use crate::format::OutputFormat;
use clap::{value_parser, Arg, ArgAction};
use std::path::PathBuf;

// Commands
pub const COMMAND_UPLOAD: &str = "upload";
pub const COMMAND_TOKEN: &str = "token";
pub const COMMAND_INSPECT: &str = "inspect";

// Parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_FILE: &str = "file";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_EXTERNAL_ID: &str = "external-id";
pub const PARAMETER_DATA_SET_ID: &str = "data-set-id";
pub const PARAMETER_MIME_TYPE: &str = "mime-type";
pub const PARAMETER_METADATA: &str = "metadata";
pub const PARAMETER_SOURCE: &str = "source";
pub const PARAMETER_INSTANCE_SPACE: &str = "instance-space";
pub const PARAMETER_INSTANCE_EXTERNAL_ID: &str = "instance-external-id";

/// Create the global verbose flag.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Create the format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("CDF_UPLOAD_FORMAT")
        .default_value("text")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

/// This flag pretty-prints JSON output.
pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Format the output pretty")
}

/// Create the positional file path parameter.
pub fn file_parameter() -> Arg {
    Arg::new(PARAMETER_FILE)
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the local file to upload")
}

pub fn name_parameter() -> Arg {
    Arg::new(PARAMETER_NAME)
        .short('n')
        .long(PARAMETER_NAME)
        .num_args(1)
        .required(false)
        .help("File name recorded in CDF (defaults to the local file name)")
}

pub fn external_id_parameter() -> Arg {
    Arg::new(PARAMETER_EXTERNAL_ID)
        .short('e')
        .long(PARAMETER_EXTERNAL_ID)
        .num_args(1)
        .required(false)
        .help("External id of the file, unique within the project")
}

pub fn data_set_id_parameter() -> Arg {
    Arg::new(PARAMETER_DATA_SET_ID)
        .short('d')
        .long(PARAMETER_DATA_SET_ID)
        .num_args(1)
        .required(false)
        .value_parser(value_parser!(i64))
        .help("Numeric id of the data set the file belongs to")
}

pub fn mime_type_parameter() -> Arg {
    Arg::new(PARAMETER_MIME_TYPE)
        .short('m')
        .long(PARAMETER_MIME_TYPE)
        .num_args(1)
        .required(false)
        .help("MIME type of the file (guessed from the extension when omitted)")
}

pub fn metadata_parameter() -> Arg {
    Arg::new(PARAMETER_METADATA)
        .long(PARAMETER_METADATA)
        .num_args(1)
        .required(false)
        .value_name("JSON")
        .help("Metadata as a JSON object, e.g. '{\"site\":\"oslo\"}'")
}

pub fn source_parameter() -> Arg {
    Arg::new(PARAMETER_SOURCE)
        .short('s')
        .long(PARAMETER_SOURCE)
        .num_args(1)
        .required(false)
        .default_value(crate::model::DEFAULT_SOURCE)
        .help("Source tag recorded with the file")
}

pub fn instance_space_parameter() -> Arg {
    Arg::new(PARAMETER_INSTANCE_SPACE)
        .long(PARAMETER_INSTANCE_SPACE)
        .num_args(1)
        .required(false)
        .requires(PARAMETER_INSTANCE_EXTERNAL_ID)
        .conflicts_with_all([PARAMETER_EXTERNAL_ID, PARAMETER_DATA_SET_ID, PARAMETER_METADATA])
        .help("Data modeling space of the CogniteFile node to attach the file to")
}

pub fn instance_external_id_parameter() -> Arg {
    Arg::new(PARAMETER_INSTANCE_EXTERNAL_ID)
        .long(PARAMETER_INSTANCE_EXTERNAL_ID)
        .num_args(1)
        .required(false)
        .requires(PARAMETER_INSTANCE_SPACE)
        .help("External id of the CogniteFile node to attach the file to")
}
