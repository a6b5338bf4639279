//! Media registry
//!
//! In-memory map from media identifier to its record, mirrored to a
//! single JSON snapshot file. Every save rewrites the whole snapshot.

use crate::error::{AppError, Result};
use crate::models::MediaRecord;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;

pub struct Registry {
    snapshot_path: PathBuf,
    records: BTreeMap<String, MediaRecord>,
}

impl Registry {
    /// Load the registry from its snapshot, or start empty if there is none.
    ///
    /// A snapshot that fails to parse is an error; it is never overwritten
    /// or skipped.
    pub async fn load(snapshot_path: PathBuf) -> Result<Self> {
        if !fs::try_exists(&snapshot_path).await? {
            tracing::info!(
                "Registry snapshot not found at {:?}, starting empty",
                snapshot_path
            );
            return Ok(Self {
                snapshot_path,
                records: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&snapshot_path).await?;
        let records: BTreeMap<String, MediaRecord> =
            serde_json::from_str(&content).map_err(|source| AppError::MalformedRegistry {
                path: snapshot_path.display().to_string(),
                source,
            })?;

        tracing::info!(
            "Loaded {} media records from {:?}",
            records.len(),
            snapshot_path
        );

        Ok(Self {
            snapshot_path,
            records,
        })
    }

    /// Write the full mapping to the snapshot file
    pub async fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.records)?;

        // Temp file + rename keeps the old snapshot intact if the write dies
        let temp_path = self.snapshot_path.with_extension("json.tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.snapshot_path).await?;

        tracing::debug!(
            "Registry saved to {:?} ({} records)",
            self.snapshot_path,
            self.records.len()
        );

        Ok(())
    }

    pub fn get(&self, media_id: &str) -> Option<&MediaRecord> {
        self.records.get(media_id)
    }

    pub fn insert(&mut self, record: MediaRecord) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, media_id: &str) -> Option<MediaRecord> {
        self.records.remove(media_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
