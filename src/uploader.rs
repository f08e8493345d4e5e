//! # uploader: upload one local file to CDF
//!
//! [`FileUploader`] is the seam between the CLI and the network. The real
//! implementation, [`CdfUploader`], talks to CDF; tests substitute a mock.
//!
//! The local file is opened by [`LocalFile::open`] before the uploader is
//! called, so a missing or unreadable file fails without any request being
//! made. The opened handle is moved into the request body and dropped when
//! the upload completes or fails.

use async_trait::async_trait;
use reqwest::Body;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, trace, warn};

#[cfg(test)]
use mockall::automock;

use crate::{
    cdf::{ApiError, CdfApiClient},
    credentials::Credentials,
    model::{FileMetadata, NodeApply, UploadRequest, UploadResult},
};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("cannot read file {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0:?} is not a regular file")]
    NotAFile(PathBuf),
    #[error("upload failed: {0}")]
    Api(#[from] ApiError),
}

/// A local file opened for reading, ready to be sent as an upload body.
#[derive(Debug)]
pub struct LocalFile {
    path: PathBuf,
    file: File,
    len: u64,
}

impl LocalFile {
    pub async fn open(path: &Path) -> Result<LocalFile, UploadError> {
        trace!("Opening {:?}", path);
        let io_error = |source| UploadError::FileSystem {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).await.map_err(io_error)?;
        let metadata = file.metadata().await.map_err(io_error)?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile(path.to_path_buf()));
        }

        debug!("Opened {:?} ({} bytes)", path, metadata.len());
        Ok(LocalFile {
            path: path.to_path_buf(),
            file,
            len: metadata.len(),
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The last component of the path, used as the file name in CDF.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Consume the file into a streaming request body.
    pub fn into_body(self) -> Body {
        Body::wrap_stream(ReaderStream::new(self.file))
    }
}

/// Upload a local file, returning the identifiers CDF assigned to it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest, file: LocalFile) -> Result<UploadResult, UploadError>;
}

/// [`FileUploader`] backed by the CDF REST API.
pub struct CdfUploader {
    api: CdfApiClient,
}

impl CdfUploader {
    pub fn connect(credentials: &Credentials) -> Result<CdfUploader, ApiError> {
        Ok(CdfUploader {
            api: CdfApiClient::new(credentials)?,
        })
    }

    async fn send_content(
        &self,
        created: &FileMetadata,
        mime_type: &str,
        file: LocalFile,
    ) -> Result<String, ApiError> {
        let upload_url = created.upload_url.clone().ok_or_else(|| {
            ApiError::UnexpectedResponse(format!("no upload URL returned for file {}", created.id))
        })?;

        let len = file.len();
        self.api
            .put_content(&upload_url, mime_type, len, file.into_body())
            .await?;
        Ok(upload_url)
    }

    /// Remove a file object whose content never arrived. Single attempt;
    /// a failure here is logged and the upload error is reported instead.
    async fn discard(&self, id: i64) {
        match self.api.delete_file(id).await {
            Ok(()) => debug!("Deleted file {} after the failed content upload", id),
            Err(e) => warn!("Could not delete file {} after the failed content upload: {}", id, e),
        }
    }
}

#[async_trait]
impl FileUploader for CdfUploader {
    async fn upload(&self, request: &UploadRequest, file: LocalFile) -> Result<UploadResult, UploadError> {
        let name = request.name.clone().unwrap_or_else(|| file.file_name());
        let mime_type = request.effective_mime_type();

        let created = match &request.instance {
            None => {
                self.api
                    .create_file(&request.envelope(&name, &mime_type))
                    .await?
            }
            Some(instance) => {
                if self.api.ensure_space(&instance.space).await? {
                    debug!("Created data modeling space '{}'", instance.space);
                }
                let node = NodeApply::cognite_file(instance, &name, &mime_type, &request.source);
                let applied = self.api.apply_file_node(node).await?;
                debug!(
                    "Applied node {}/{} at version {}",
                    applied.space, applied.external_id, applied.version
                );
                self.api.upload_link(instance).await?
            }
        };
        debug!("Created file with id {}", created.id);

        let upload_url = match self.send_content(&created, &mime_type, file).await {
            Ok(upload_url) => upload_url,
            Err(e) => {
                // Nodes are upserted, a rerun reuses them
                if request.instance.is_none() {
                    self.discard(created.id).await;
                }
                return Err(e.into());
            }
        };

        Ok(UploadResult {
            id: created.id,
            external_id: created.external_id,
            name: created.name.unwrap_or(name),
            mime_type,
            data_set_id: created.data_set_id,
            instance: created.instance_id.or_else(|| request.instance.clone()),
            upload_url: Some(upload_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_existing_file() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(b"hello world").unwrap();

        let file = LocalFile::open(temp.path()).await.unwrap();
        assert_eq!(file.len(), 11);
        assert!(!file.is_empty());
        assert_eq!(
            file.file_name(),
            temp.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match LocalFile::open(&path).await.unwrap_err() {
            UploadError::FileSystem { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        let error = LocalFile::open(dir.path()).await.unwrap_err();
        assert!(matches!(error, UploadError::NotAFile(_)));
    }
}
