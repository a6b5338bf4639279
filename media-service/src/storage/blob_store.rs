//! Blob storage for uploaded media
//!
//! Each upload is written to its own file directly under the store root,
//! named by its generated media identifier.
//!
//! Example: "photo.png" is stored at "media_storage/3f2b...-....png"

use super::media_id::generate_media_id;
use crate::error::{AppError, Result};
use crate::models::MediaRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Filesystem blob store
#[derive(Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a new blob store at the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Initialize the blob store (create directory if needed)
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::info!("Blob store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Write an upload to a new blob and describe it as a record.
    ///
    /// The record is not registered anywhere; that is the caller's job.
    pub async fn write(
        &self,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(String, MediaRecord)> {
        fs::create_dir_all(&self.root).await?;

        let media_id = generate_media_id(original_name);
        let path = self.path_for(&media_id);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        if let Err(e) = write_fully(&mut file, data).await {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial blob {:?}: {}", path, cleanup);
            }
            return Err(e.into());
        }

        tracing::debug!("Wrote blob: {} ({} bytes)", media_id, data.len());

        let record = MediaRecord {
            id: media_id.clone(),
            original_name: original_name.to_string(),
            content_type: content_type.to_string(),
            path: path.to_string_lossy().into_owned(),
            size: data.len() as u64,
        };

        Ok((media_id, record))
    }

    /// Read the full contents of a record's blob
    pub async fn read(&self, record: &MediaRecord) -> Result<Vec<u8>> {
        let data = fs::read(&record.path)
            .await
            .map_err(|e| blob_error(&record.id, e))?;

        tracing::debug!("Read blob: {} ({} bytes)", record.id, data.len());

        Ok(data)
    }

    /// Delete a record's blob.
    ///
    /// A blob that is already gone is an error, so the caller keeps the
    /// registry entry.
    pub async fn delete(&self, record: &MediaRecord) -> Result<()> {
        fs::remove_file(&record.path)
            .await
            .map_err(|e| blob_error(&record.id, e))?;

        tracing::debug!("Deleted blob: {}", record.id);

        Ok(())
    }

    /// Get file path for a media identifier
    pub fn path_for(&self, media_id: &str) -> PathBuf {
        self.root.join(media_id)
    }

    /// Get blob store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

async fn write_fully(file: &mut fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.sync_all().await
}

fn blob_error(media_id: &str, err: std::io::Error) -> AppError {
    if err.kind() == ErrorKind::NotFound {
        AppError::BlobMissing {
            id: media_id.to_string(),
            source: err,
        }
    } else {
        AppError::Io(err)
    }
}
