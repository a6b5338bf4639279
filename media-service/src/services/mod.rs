//! Services module
//!
//! Business logic services that coordinate between the HTTP API and storage.

pub mod media;

pub use media::MediaService;
