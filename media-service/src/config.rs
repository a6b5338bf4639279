//! Service configuration constants
//!
//! Central location for default paths, limits and the fixed response
//! strings of the HTTP contract.

use std::net::SocketAddr;
use std::path::PathBuf;

// ===== Storage Layout =====

/// Base directory for blobs and the registry snapshot when none is given
pub const DEFAULT_STORAGE_DIR: &str = "media_storage";

/// Snapshot file mirroring the in-memory registry, stored in the base directory
pub const REGISTRY_FILE_NAME: &str = "media_registry.json";

// ===== Server =====

/// Default listen address for the HTTP API
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Maximum accepted request body for uploads (100 MiB).
/// Uploads are buffered fully in memory before being written.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Multipart field carrying the uploaded file
pub const UPLOAD_FIELD_NAME: &str = "file";

// ===== Upload Defaults =====

/// Recorded original name when a multipart part carries no filename
pub const DEFAULT_UPLOAD_FILENAME: &str = "uploaded_file";

/// Recorded content type when a multipart part declares none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ===== Response Bodies =====

pub const MEDIA_NOT_FOUND_DETAIL: &str = "Media not found";

pub const MEDIA_DELETED_MESSAGE: &str = "Media deleted successfully";

/// Detail for every 500; the underlying error is only logged
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Runtime configuration for the service process
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub storage_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl ServiceConfig {
    pub fn registry_path(&self) -> PathBuf {
        self.storage_dir.join(REGISTRY_FILE_NAME)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
