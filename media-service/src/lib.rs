//! Media service library
//!
//! Blob storage with a JSON registry, the HTTP API over it, and a client
//! for remote callers. The binary in `main.rs` wires these together.

pub mod api;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use client::{MediaServiceClient, UploadSource};
pub use error::{AppError, Result};
pub use models::MediaRecord;
pub use services::MediaService;
