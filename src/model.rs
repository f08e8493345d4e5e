//! Data models for the uploader and the parts of the CDF API it talks to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Value of the `source` field when the caller does not pass `--source`.
pub const DEFAULT_SOURCE: &str = "cdf-upload";

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Space and view of the core data model type that describes files.
pub const CDM_SPACE: &str = "cdf_cdm";
pub const CDM_FILE_VIEW: &str = "CogniteFile";
pub const CDM_FILE_VIEW_VERSION: &str = "v1";

/// Identifies a node in a data modeling space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceId {
    pub space: String,
    pub external_id: String,
}

/// Everything needed to upload one local file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    /// Name recorded in CDF; the file name of `file_path` when absent.
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub data_set_id: Option<i64>,
    pub mime_type: Option<String>,
    pub metadata: Option<BTreeMap<String, String>>,
    pub source: String,
    /// When set, the file is attached to a `CogniteFile` node instead of
    /// being created through the classic files endpoint.
    pub instance: Option<InstanceId>,
}

impl UploadRequest {
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            name: None,
            external_id: None,
            data_set_id: None,
            mime_type: None,
            metadata: None,
            source: DEFAULT_SOURCE.to_string(),
            instance: None,
        }
    }

    /// The explicit MIME type, or one guessed from the file extension.
    pub fn effective_mime_type(&self) -> String {
        match &self.mime_type {
            Some(mime_type) => mime_type.clone(),
            None => guess_mime_type(&self.file_path).to_string(),
        }
    }

    /// Build the body of the file creation call.
    pub fn envelope(&self, name: &str, mime_type: &str) -> FileEnvelope {
        FileEnvelope {
            name: name.to_string(),
            external_id: self.external_id.clone(),
            data_set_id: self.data_set_id,
            mime_type: Some(mime_type.to_string()),
            metadata: self.metadata.clone(),
            source: Some(self.source.clone()),
        }
    }
}

/// Request body of `POST /files`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEnvelope {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// File object returned by CDF when a file is created or an upload link is requested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: i64,
    pub external_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub data_set_id: Option<i64>,
    pub upload_url: Option<String>,
    #[serde(default)]
    pub uploaded: bool,
    pub instance_id: Option<InstanceId>,
}

/// Identifiers of an uploaded file, printed once the run succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResult {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub name: String,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<InstanceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,
}

/// Reference to a file by its internal id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileId {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> Items<T> {
    pub fn single(item: T) -> Self {
        Self { items: vec![item] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceApply {
    pub space: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpaceApply {
    /// Space with a readable name derived from its identifier, `my_files` becoming `My Files Space`.
    pub fn for_files(space: &str) -> Self {
        let title = space
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ");

        Self {
            space: space.to_string(),
            name: Some(format!("{} Space", title)),
            description: Some(format!("Space for {} data models and instances.", space)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceReference {
    pub space: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReference {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub space: &'static str,
    pub external_id: &'static str,
    pub version: &'static str,
}

impl ViewReference {
    pub fn cognite_file() -> Self {
        Self {
            kind: "view",
            space: CDM_SPACE,
            external_id: CDM_FILE_VIEW,
            version: CDM_FILE_VIEW_VERSION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSource {
    pub source: ViewReference,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// Node write of `POST /models/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeApply {
    pub instance_type: &'static str,
    pub space: String,
    pub external_id: String,
    pub sources: Vec<NodeSource>,
}

impl NodeApply {
    /// A `CogniteFile` node carrying the file name, MIME type and source id.
    pub fn cognite_file(instance: &InstanceId, name: &str, mime_type: &str, source_id: &str) -> Self {
        let mut properties = serde_json::Map::new();
        properties.insert("name".to_string(), serde_json::Value::from(name));
        properties.insert("mimeType".to_string(), serde_json::Value::from(mime_type));
        properties.insert("sourceId".to_string(), serde_json::Value::from(source_id));

        Self {
            instance_type: "node",
            space: instance.space.clone(),
            external_id: instance.external_id.clone(),
            sources: vec![NodeSource {
                source: ViewReference::cognite_file(),
                properties,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeApplyResult {
    pub space: String,
    pub external_id: String,
    pub version: i64,
    #[serde(default)]
    pub was_modified: bool,
}

/// Body of `POST /files/uploadlink`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLinkRequest {
    pub instance_id: InstanceId,
}

/// Response of `GET /api/v1/token/inspect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInspection {
    pub subject: String,
    #[serde(default)]
    pub projects: Vec<ProjectScope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScope {
    pub project_url_name: String,
    #[serde(default)]
    pub groups: Vec<i64>,
}

/// Guess a MIME type from the extension of `path`.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let extension = match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => extension.to_ascii_lowercase(),
        None => return OCTET_STREAM,
    };

    match extension.as_str() {
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "htm" | "html" => "text/html",
        "css" => "text/css",
        "xml" => "text/xml",
        "js" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "md" => "text/markdown",
        "yaml" | "yml" => "application/yaml",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "mp4" => "video/mp4",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("report.PDF")), "application/pdf");
        assert_eq!(guess_mime_type(Path::new("./notes.txt")), "text/plain");
        assert_eq!(guess_mime_type(Path::new("data/readings.csv")), "text/csv");
        assert_eq!(guess_mime_type(Path::new("drawing.dwg")), OCTET_STREAM);
        assert_eq!(guess_mime_type(Path::new("Makefile")), OCTET_STREAM);
    }

    #[test]
    fn test_explicit_mime_type_wins() {
        let mut request = UploadRequest::new(PathBuf::from("notes.txt"));
        assert_eq!(request.effective_mime_type(), "text/plain");
        request.mime_type = Some("text/x-custom".to_string());
        assert_eq!(request.effective_mime_type(), "text/x-custom");
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let request = UploadRequest::new(PathBuf::from("notes.txt"));
        let body = serde_json::to_value(request.envelope("notes.txt", "text/plain")).unwrap();
        assert_eq!(
            body,
            json!({"name": "notes.txt", "mimeType": "text/plain", "source": "cdf-upload"})
        );
    }

    #[test]
    fn test_envelope_data_set_id_is_an_integer() {
        let mut request = UploadRequest::new(PathBuf::from("notes.txt"));
        request.data_set_id = Some(42);
        request.external_id = Some("doc-1".to_string());
        let body = serde_json::to_value(request.envelope("notes.txt", "text/plain")).unwrap();
        assert_eq!(body["dataSetId"], json!(42));
        assert!(body["dataSetId"].is_i64());
        assert_eq!(body["externalId"], json!("doc-1"));
    }

    #[test]
    fn test_file_metadata_from_create_response() {
        let response = json!({
            "id": 1234567890,
            "externalId": "doc-1",
            "name": "notes.txt",
            "mimeType": "text/plain",
            "uploaded": false,
            "uploadUrl": "https://storage.example.com/upload?sig=abc",
            "createdTime": 1700000000000i64,
            "lastUpdatedTime": 1700000000000i64
        });
        let metadata: FileMetadata = serde_json::from_value(response).unwrap();
        assert_eq!(metadata.id, 1234567890);
        assert_eq!(metadata.external_id.as_deref(), Some("doc-1"));
        assert_eq!(
            metadata.upload_url.as_deref(),
            Some("https://storage.example.com/upload?sig=abc")
        );
        assert!(!metadata.uploaded);
    }

    #[test]
    fn test_space_apply_title() {
        let space = SpaceApply::for_files("my_files_space");
        assert_eq!(space.name.as_deref(), Some("My Files Space Space"));
        assert_eq!(
            space.description.as_deref(),
            Some("Space for my_files_space data models and instances.")
        );
    }

    #[test]
    fn test_cognite_file_node() {
        let instance = InstanceId {
            space: "my_files".to_string(),
            external_id: "doc-1".to_string(),
        };
        let node = NodeApply::cognite_file(&instance, "notes.txt", "text/plain", "cdf-upload");
        let body = serde_json::to_value(Items::single(node)).unwrap();
        assert_eq!(
            body,
            json!({"items": [{
                "instanceType": "node",
                "space": "my_files",
                "externalId": "doc-1",
                "sources": [{
                    "source": {"type": "view", "space": "cdf_cdm", "externalId": "CogniteFile", "version": "v1"},
                    "properties": {"name": "notes.txt", "mimeType": "text/plain", "sourceId": "cdf-upload"}
                }]
            }]})
        );
    }
}
