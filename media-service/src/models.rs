//! Media models
//!
//! Records persisted in the registry snapshot and the JSON bodies
//! exchanged over the HTTP API.

use serde::{Deserialize, Serialize};

/// Metadata for one stored blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Generated identifier, also the blob's filename
    pub id: String,
    /// Caller-supplied filename, used only for download naming
    pub original_name: String,
    /// Declared MIME type, stored verbatim
    pub content_type: String,
    /// Location of the blob on disk
    pub path: String,
    /// Byte length at write time
    pub size: u64,
}

/// Response body for `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub media_id: String,
    pub metadata: MediaRecord,
}

/// Response body for a successful `DELETE /media/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_flat() {
        let record = MediaRecord {
            id: "abc.txt".to_string(),
            original_name: "a.txt".to_string(),
            content_type: "text/plain".to_string(),
            path: "media_storage/abc.txt".to_string(),
            size: 5,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["original_name"], "a.txt");
        assert_eq!(value["content_type"], "text/plain");
        assert_eq!(value["size"], 5);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
