//! Formatting utilities for the uploader's output.
//!
//! Results are printed either as short human-readable lines (the default)
//! or as JSON for scripts.

use std::fmt::Write as _;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

use crate::model::{TokenInspection, UploadResult};

pub const TEXT: &str = "text";
pub const JSON: &str = "json";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    WriteError(#[from] std::fmt::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputFormatOptions {
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq, EnumIter)]
pub enum OutputFormat {
    /// Plain text lines for people
    Text(OutputFormatOptions),
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
}

impl OutputFormat {
    /// Returns a vector of all supported format names as strings
    pub fn names() -> Vec<&'static str> {
        OutputFormat::iter().map(|f| f.name()).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text(_) => TEXT,
            OutputFormat::Json(_) => JSON,
        }
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        match format_str.to_lowercase().as_str() {
            TEXT => Ok(OutputFormat::Text(options)),
            JSON => Ok(OutputFormat::Json(options)),
            other => Err(FormattingError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text(OutputFormatOptions::default())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for formatting data in different output formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> Result<String, FormattingError>;
}

fn to_json<T: serde::Serialize>(value: &T, options: &OutputFormatOptions) -> Result<String, FormattingError> {
    if options.pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

impl OutputFormatter for UploadResult {
    fn format(&self, format: OutputFormat) -> Result<String, FormattingError> {
        match format {
            OutputFormat::Json(options) => to_json(self, &options),
            OutputFormat::Text(_) => {
                let mut out = String::new();
                write!(out, "Uploaded file id={}", self.id)?;
                if let Some(external_id) = &self.external_id {
                    write!(out, " external_id={}", external_id)?;
                }
                write!(out, "\n  name: {}", self.name)?;
                write!(out, "\n  mime type: {}", self.mime_type)?;
                if let Some(data_set_id) = self.data_set_id {
                    write!(out, "\n  data set: {}", data_set_id)?;
                }
                if let Some(instance) = &self.instance {
                    write!(out, "\n  instance: {}/{}", instance.space, instance.external_id)?;
                }
                write!(out, "\n  content: uploaded")?;
                Ok(out)
            }
        }
    }
}

impl OutputFormatter for TokenInspection {
    fn format(&self, format: OutputFormat) -> Result<String, FormattingError> {
        match format {
            OutputFormat::Json(options) => to_json(self, &options),
            OutputFormat::Text(_) => {
                let mut out = String::new();
                write!(out, "Subject: {}", self.subject)?;
                if self.projects.is_empty() {
                    write!(out, "\nProjects: none")?;
                }
                for project in &self.projects {
                    write!(out, "\nProject: {} ({} groups)", project.project_url_name, project.groups.len())?;
                }
                Ok(out)
            }
        }
    }
}
