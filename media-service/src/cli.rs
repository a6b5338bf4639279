//! Command-line arguments for the service binary

use crate::config::{ServiceConfig, DEFAULT_BIND_ADDR, DEFAULT_STORAGE_DIR};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "media-service", version, about = "Media blob-storage service")]
pub struct Args {
    /// Directory holding blobs and the registry snapshot
    #[arg(long, env = "MEDIA_STORAGE_DIR", default_value = DEFAULT_STORAGE_DIR)]
    pub storage_dir: PathBuf,

    /// Address the HTTP API listens on
    #[arg(long, env = "MEDIA_BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Largest accepted upload body in bytes
    #[arg(long, env = "MEDIA_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<usize>,
}

impl From<Args> for ServiceConfig {
    fn from(args: Args) -> Self {
        let defaults = ServiceConfig::default();
        Self {
            storage_dir: args.storage_dir,
            bind_addr: args.bind,
            max_upload_bytes: args.max_upload_bytes.unwrap_or(defaults.max_upload_bytes),
        }
    }
}
