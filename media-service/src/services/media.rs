//! Media service
//!
//! Handles upload, retrieval and deletion of media.
//! Integrates Registry and BlobStore.

use crate::config::REGISTRY_FILE_NAME;
use crate::error::{AppError, Result};
use crate::models::MediaRecord;
use crate::storage::{BlobStore, Registry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Service for managing stored media.
///
/// Cloning is cheap; clones share one registry. Every registry mutation
/// and snapshot write happens under its lock.
#[derive(Clone)]
pub struct MediaService {
    blob_store: BlobStore,
    registry: Arc<Mutex<Registry>>,
}

impl MediaService {
    /// Open the store rooted at `base_path`, loading any prior snapshot
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();

        let blob_store = BlobStore::new(base_path.clone());
        blob_store.initialize().await?;

        let registry = Registry::load(base_path.join(REGISTRY_FILE_NAME)).await?;

        tracing::info!(
            "Media service opened at {:?} with {} records",
            base_path,
            registry.len()
        );

        Ok(Self {
            blob_store,
            registry: Arc::new(Mutex::new(registry)),
        })
    }

    /// Flush the registry snapshot one last time
    pub async fn close(&self) -> Result<()> {
        let registry = self.registry.lock().await;
        registry.save().await?;
        tracing::info!("Media service closed ({} records)", registry.len());
        Ok(())
    }

    /// Store an upload and register it
    pub async fn save_media(
        &self,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<(String, MediaRecord)> {
        tracing::info!(
            "Saving media: {} ({}, {} bytes)",
            original_name,
            content_type,
            data.len()
        );

        let (media_id, record) = self
            .blob_store
            .write(original_name, content_type, data)
            .await?;

        let mut registry = self.registry.lock().await;
        registry.insert(record.clone());

        if let Err(e) = registry.save().await {
            registry.remove(&media_id);
            drop(registry);

            tracing::error!("Failed to persist registry for {}: {}", media_id, e);
            if let Err(cleanup) = self.blob_store.delete(&record).await {
                tracing::warn!("Failed to remove orphaned blob {}: {}", media_id, cleanup);
            }
            return Err(e);
        }

        tracing::info!("Media saved: {}", media_id);

        Ok((media_id, record))
    }

    /// Get the record for a media identifier, if registered
    pub async fn get_media_info(&self, media_id: &str) -> Option<MediaRecord> {
        self.registry.lock().await.get(media_id).cloned()
    }

    /// Read a media blob, copying it to `save_path` first when given
    pub async fn get_media(
        &self,
        media_id: &str,
        save_path: Option<&Path>,
    ) -> Result<(MediaRecord, Vec<u8>)> {
        let record = self
            .get_media_info(media_id)
            .await
            .ok_or_else(|| AppError::MediaNotFound(media_id.to_string()))?;

        let data = self.blob_store.read(&record).await?;

        if let Some(dest) = save_path {
            tokio::fs::write(dest, &data).await?;
            tracing::debug!("Copied media {} to {:?}", media_id, dest);
        }

        Ok((record, data))
    }

    /// Delete a media blob and its registry entry.
    ///
    /// The entry is only removed once the blob is gone.
    pub async fn delete_media(&self, media_id: &str) -> Result<()> {
        tracing::info!("Deleting media: {}", media_id);

        let mut registry = self.registry.lock().await;

        let record = registry
            .get(media_id)
            .cloned()
            .ok_or_else(|| AppError::MediaNotFound(media_id.to_string()))?;

        self.blob_store.delete(&record).await?;

        registry.remove(media_id);
        registry.save().await?;

        tracing::info!("Media deleted: {}", media_id);

        Ok(())
    }

    /// Number of registered media records
    pub async fn media_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Get the blob store root directory
    pub fn base_path(&self) -> &Path {
        self.blob_store.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_service() -> (MediaService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let service = MediaService::open(temp_dir.path().join("media_storage"))
            .await
            .unwrap();
        (service, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_get_media() {
        let (service, _temp) = create_test_service().await;

        let (media_id, record) = service
            .save_media("a.txt", "text/plain", b"hello")
            .await
            .unwrap();

        assert!(media_id.ends_with(".txt"));
        assert_eq!(record.original_name, "a.txt");
        assert_eq!(record.content_type, "text/plain");
        assert_eq!(record.size, 5);

        let (fetched, data) = service.get_media(&media_id, None).await.unwrap();
        assert_eq!(data, b"hello");
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_get_media_copies_to_save_path() {
        let (service, temp) = create_test_service().await;

        let (media_id, _) = service
            .save_media("pic.jpg", "image/jpeg", b"\xff\xd8\xff")
            .await
            .unwrap();

        let dest = temp.path().join("download.jpg");
        let (_, data) = service.get_media(&media_id, Some(dest.as_path())).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), data);
    }

    #[tokio::test]
    async fn test_uniqueness() {
        let (service, _temp) = create_test_service().await;

        let (id1, _) = service.save_media("x.bin", "application/octet-stream", b"same").await.unwrap();
        let (id2, _) = service.save_media("x.bin", "application/octet-stream", b"same").await.unwrap();
        assert_ne!(id1, id2);

        service.delete_media(&id1).await.unwrap();

        let (_, data) = service.get_media(&id2, None).await.unwrap();
        assert_eq!(data, b"same");
        service.delete_media(&id2).await.unwrap();
        assert_eq!(service.media_count().await, 0);
    }

    #[tokio::test]
    async fn test_deletion_finality() {
        let (service, _temp) = create_test_service().await;

        let (media_id, record) = service.save_media("a.txt", "text/plain", b"bye").await.unwrap();
        service.delete_media(&media_id).await.unwrap();

        assert!(!PathBuf::from(&record.path).exists());

        let get = service.get_media(&media_id, None).await;
        assert!(matches!(get, Err(AppError::MediaNotFound(_))));

        let again = service.delete_media(&media_id).await;
        assert!(matches!(again, Err(AppError::MediaNotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (service, _temp) = create_test_service().await;

        let id = uuid::Uuid::new_v4().to_string();
        assert!(service.get_media_info(&id).await.is_none());
        assert!(matches!(
            service.get_media(&id, None).await,
            Err(AppError::MediaNotFound(_))
        ));
        assert!(matches!(
            service.delete_media(&id).await,
            Err(AppError::MediaNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_blob_removal_keeps_entry() {
        let (service, _temp) = create_test_service().await;

        let (media_id, record) = service.save_media("a.txt", "text/plain", b"x").await.unwrap();
        std::fs::remove_file(&record.path).unwrap();

        let result = service.delete_media(&media_id).await;
        assert!(matches!(result, Err(AppError::BlobMissing { .. })));
        assert_eq!(service.get_media_info(&media_id).await, Some(record));
    }

    #[tokio::test]
    async fn test_registry_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().join("media_storage");

        let (media_id, record) = {
            let service = MediaService::open(&base).await.unwrap();
            let saved = service.save_media("photo.png", "image/png", b"png").await.unwrap();
            service.close().await.unwrap();
            saved
        };

        let reopened = MediaService::open(&base).await.unwrap();
        assert_eq!(reopened.get_media_info(&media_id).await, Some(record));

        let (_, data) = reopened.get_media(&media_id, None).await.unwrap();
        assert_eq!(data, b"png");
    }

    #[tokio::test]
    async fn test_snapshot_written_on_every_mutation() {
        let (service, _temp) = create_test_service().await;
        let snapshot = service.base_path().join(REGISTRY_FILE_NAME);

        let (media_id, _) = service.save_media("a.txt", "text/plain", b"x").await.unwrap();
        let content = std::fs::read_to_string(&snapshot).unwrap();
        assert!(content.contains(&media_id));

        service.delete_media(&media_id).await.unwrap();
        let content = std::fs::read_to_string(&snapshot).unwrap();
        assert!(!content.contains(&media_id));
    }

    #[tokio::test]
    async fn test_failed_snapshot_rolls_back_upload() {
        let (service, _temp) = create_test_service().await;

        // A directory where the temp snapshot goes makes every save fail
        let blocker = service.base_path().join("media_registry.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        let result = service.save_media("a.txt", "text/plain", b"lost").await;
        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(service.media_count().await, 0);

        let leftovers: Vec<_> = std::fs::read_dir(service.base_path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(leftovers, vec![blocker]);
    }

    #[tokio::test]
    async fn test_concurrent_uploads() {
        let (service, _temp) = create_test_service().await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let name = format!("file{}.dat", i);
                service.save_media(&name, "application/octet-stream", name.as_bytes()).await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.media_count().await, 16);

        let reopened = MediaService::open(service.base_path()).await.unwrap();
        assert_eq!(reopened.media_count().await, 16);
    }
}
