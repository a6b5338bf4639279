//! Storage module
//!
//! Blob files on disk plus the registry that describes them.

pub mod blob_store;
pub mod media_id;
pub mod registry;

pub use blob_store::BlobStore;
pub use media_id::generate_media_id;
pub use registry::Registry;
