//! Client for a remote media service
//!
//! Wraps the three HTTP operations. Every failure, whether transport,
//! non-2xx status or local file access, is logged and collapsed into
//! `None`; callers cannot tell "not found" from "server down".

use crate::config::{DEFAULT_UPLOAD_FILENAME, MEDIA_DELETED_MESSAGE, UPLOAD_FIELD_NAME};
use crate::error::Result;
use crate::models::{MessageResponse, UploadResponse};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};

/// What to upload: a file on disk or an in-memory buffer
#[derive(Debug, Clone)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes {
        name: String,
        data: Vec<u8>,
        content_type: Option<String>,
    },
}

impl UploadSource {
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        UploadSource::Bytes {
            name: name.into(),
            data: data.into(),
            content_type: None,
        }
    }

    /// Declare the content type of an in-memory upload
    pub fn with_content_type(self, mime: impl Into<String>) -> Self {
        match self {
            UploadSource::Bytes { name, data, .. } => UploadSource::Bytes {
                name,
                data,
                content_type: Some(mime.into()),
            },
            path => path,
        }
    }
}

impl From<&Path> for UploadSource {
    fn from(path: &Path) -> Self {
        UploadSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        UploadSource::Path(path)
    }
}

#[derive(Clone)]
pub struct MediaServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl MediaServiceClient {
    /// Create a client for the service at `base_url`, e.g. `http://localhost:8000`
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("media-service-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Upload a file, returning its media ID
    pub async fn upload(&self, source: impl Into<UploadSource>) -> Option<String> {
        match self.try_upload(source.into()).await {
            Ok(media_id) => Some(media_id),
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                None
            }
        }
    }

    /// Download a media file, also writing it to `save_path` when given
    pub async fn get(&self, media_id: &str, save_path: Option<&Path>) -> Option<Vec<u8>> {
        match self.try_get(media_id, save_path).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Fetching media {} failed: {}", media_id, e);
                None
            }
        }
    }

    /// Delete a media file; `Some(true)` when the service confirms it
    pub async fn delete(&self, media_id: &str) -> Option<bool> {
        match self.try_delete(media_id).await {
            Ok(deleted) => Some(deleted),
            Err(e) => {
                tracing::warn!("Deleting media {} failed: {}", media_id, e);
                None
            }
        }
    }

    async fn try_upload(&self, source: UploadSource) -> Result<String> {
        let part = match source {
            UploadSource::Path(path) => {
                let data = tokio::fs::read(&path).await?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| DEFAULT_UPLOAD_FILENAME.to_string());
                Part::bytes(data).file_name(name)
            }
            UploadSource::Bytes {
                name,
                data,
                content_type,
            } => {
                let part = Part::bytes(data).file_name(name);
                match content_type {
                    Some(mime) => part.mime_str(&mime)?,
                    None => part,
                }
            }
        };

        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;
        tracing::debug!("Uploaded media: {}", body.media_id);

        Ok(body.media_id)
    }

    async fn try_get(&self, media_id: &str, save_path: Option<&Path>) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.media_url(media_id))
            .send()
            .await?
            .error_for_status()?;

        let data = response.bytes().await?.to_vec();

        if let Some(dest) = save_path {
            tokio::fs::write(dest, &data).await?;
        }

        Ok(data)
    }

    async fn try_delete(&self, media_id: &str) -> Result<bool> {
        let response = self
            .http
            .delete(self.media_url(media_id))
            .send()
            .await?
            .error_for_status()?;

        let body: MessageResponse = response.json().await?;

        Ok(body.message == MEDIA_DELETED_MESSAGE)
    }

    fn media_url(&self, media_id: &str) -> String {
        format!("{}/media/{}", self.base_url, media_id)
    }
}
