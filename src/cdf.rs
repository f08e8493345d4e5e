//! Client for the parts of the Cognite Data Fusion REST API used by the uploader.
//!
//! All calls carry a bearer token obtained through [`AuthClient`]. Each call
//! is attempted once; failures are classified into [`ApiError`] variants so
//! the CLI can tell a duplicate external id from any other rejection.

use reqwest::{Body, Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, trace};
use url::Url;

use crate::{
    auth::{AuthClient, AuthError},
    credentials::{CredentialError, Credentials},
    model::{
        FileEnvelope, FileId, FileMetadata, InstanceId, Items, NodeApply, NodeApplyResult, SpaceApply,
        SpaceReference, TokenInspection, UploadLinkRequest,
    },
};

pub const USER_AGENT: &str = concat!("cdf-upload/", env!("CARGO_PKG_VERSION"));

/// Error emitted by the CDF API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("conflict: {message}")]
    Conflict {
        message: String,
        duplicated: Vec<String>,
    },
    #[error("CDF API returned HTTP {status}: {message}")]
    Remote { status: StatusCode, message: String },
    #[error("unexpected response from CDF: {0}")]
    UnexpectedResponse(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    duplicated: Vec<serde_json::Value>,
}

/// Classify a failed CDF response.
///
/// CDF reports duplicate external ids either as HTTP 409 or as a
/// `duplicated` list in the error body; both become [`ApiError::Conflict`].
pub fn classify_error(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let message = match &parsed {
        Some(envelope) if !envelope.error.message.is_empty() => envelope.error.message.clone(),
        _ if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        _ => body.trim().to_string(),
    };

    let duplicated: Vec<String> = parsed
        .map(|envelope| {
            envelope
                .error
                .duplicated
                .iter()
                .map(|item| match item.get("externalId").and_then(|x| x.as_str()) {
                    Some(external_id) => external_id.to_string(),
                    None => item.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    if status == StatusCode::CONFLICT || !duplicated.is_empty() {
        let message = if duplicated.is_empty() {
            message
        } else {
            format!(
                "a file with external id {} already exists ({})",
                duplicated.join(", "),
                message
            )
        };
        return ApiError::Conflict { message, duplicated };
    }

    ApiError::Remote { status, message }
}

pub struct CdfApiClient {
    http: Client,
    base_url: Url,
    project: String,
    auth: AuthClient,
}

impl CdfApiClient {
    /// Build a client for the project and cluster in `credentials`.
    ///
    /// No request is made here; the token is fetched by the first call.
    pub fn new(credentials: &Credentials) -> Result<Self, ApiError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let auth = AuthClient::new(http.clone(), credentials);
        Ok(Self {
            http,
            base_url: credentials.base_url()?,
            project: credentials.project().to_string(),
            auth,
        })
    }

    fn project_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self
            .base_url
            .join(&format!("api/v1/projects/{}/{}", self.project, path))?)
    }

    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                if e.is_decode() {
                    ApiError::UnexpectedResponse(e.to_string())
                } else {
                    ApiError::Network(e)
                }
            });
        }

        let body = response.text().await.unwrap_or_default();
        error!("Request failed with status {}: {}", status, body);
        Err(classify_error(status, &body))
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        trace!("POST {}", url);
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::check(response).await
    }

    /// Create the file object and return it together with its upload URL.
    pub async fn create_file(&self, envelope: &FileEnvelope) -> Result<FileMetadata, ApiError> {
        debug!("Creating file {:?} in project {}", envelope.name, self.project);
        let url = self.project_url("files")?;
        self.post_json(url, envelope).await
    }

    /// Delete a file object by its internal id.
    pub async fn delete_file(&self, id: i64) -> Result<(), ApiError> {
        debug!("Deleting file {} in project {}", id, self.project);
        let url = self.project_url("files/delete")?;
        trace!("POST {}", url);
        let token = self.auth.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&Items::single(FileId { id }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }

    /// Request an upload URL for the file attached to a data modeling node.
    pub async fn upload_link(&self, instance: &InstanceId) -> Result<FileMetadata, ApiError> {
        debug!(
            "Requesting upload link for instance {}/{}",
            instance.space, instance.external_id
        );
        let url = self.project_url("files/uploadlink")?;
        let request = Items::single(UploadLinkRequest {
            instance_id: instance.clone(),
        });
        let response: Items<FileMetadata> = self.post_json(url, &request).await?;
        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::UnexpectedResponse("upload link response had no items".to_string()))
    }

    /// Stream `body` to a signed upload URL returned by CDF.
    ///
    /// The URL carries its own authorization, so no bearer token is sent.
    pub async fn put_content(
        &self,
        upload_url: &str,
        mime_type: &str,
        content_length: u64,
        body: Body,
    ) -> Result<(), ApiError> {
        let url = Url::parse(upload_url)?;
        debug!("Uploading {} bytes to {}", content_length, url.host_str().unwrap_or("?"));
        let response = self
            .http
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .header(reqwest::header::CONTENT_LENGTH, content_length)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        error!("Content upload failed with status {}: {}", status, body);
        Err(ApiError::Remote {
            status,
            message: format!("content upload rejected: {}", body.trim()),
        })
    }

    /// Make sure the data modeling space exists. Returns `true` when it was created.
    pub async fn ensure_space(&self, space: &str) -> Result<bool, ApiError> {
        let url = self.project_url("models/spaces/byids")?;
        let query = Items::single(SpaceReference {
            space: space.to_string(),
        });
        let existing: Items<SpaceReference> = self.post_json(url, &query).await?;
        if existing.items.iter().any(|s| s.space == space) {
            debug!("Data modeling space '{}' already exists", space);
            return Ok(false);
        }

        debug!("Data modeling space '{}' not found, creating it", space);
        let url = self.project_url("models/spaces")?;
        let _: Items<SpaceApply> = self
            .post_json(url, &Items::single(SpaceApply::for_files(space)))
            .await?;
        Ok(true)
    }

    /// Create or update the `CogniteFile` node describing the file.
    pub async fn apply_file_node(&self, node: NodeApply) -> Result<NodeApplyResult, ApiError> {
        debug!("Applying CogniteFile node {}/{}", node.space, node.external_id);
        let url = self.project_url("models/instances")?;
        let response: Items<NodeApplyResult> = self.post_json(url, &Items::single(node)).await?;
        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::UnexpectedResponse("instance apply returned no nodes".to_string()))
    }

    /// Verify the credentials and list the projects the token can reach.
    pub async fn inspect_token(&self) -> Result<TokenInspection, ApiError> {
        let url = self.base_url.join("api/v1/token/inspect")?;
        trace!("GET {}", url);
        let token = self.auth.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        Self::check(response).await
    }
}
