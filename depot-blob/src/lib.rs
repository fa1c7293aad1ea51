//! # depot-blob: chunked object storage with range-aware delivery
//!
//! `depot-blob` is the server-agnostic core of Depot: a chunked object
//! store abstraction plus the download and upload pipelines that drive it.
//! Downloads are streaming-first with full byte-range support; uploads are
//! single-shot buffered commits that report the id the store assigned.
//!
//! ## Key pieces
//!
//! - **Range parser**: `Range` header text + object length → inclusive
//!   byte window, with the original service's fallback ladder preserved
//! - **Download pipeline**: lookup → range validation → backpressured
//!   chunk stream, reported as one terminal [`DownloadReply`] per request
//! - **Upload pipeline**: buffered payload → store sink → committed id
//! - **Store trait**: [`ChunkStore`] keeps backends pluggable; the
//!   in-memory chunked backend ships here
//!
//! No HTTP types appear in this crate. Protocol mapping lives in
//! `depot-axum`, which translates [`DownloadReply`] variants into
//! statuses and headers.
//!
//! ## Quick Start
//!
//! ```rust
//! use depot_blob::prelude::*;
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> BlobResult<()> {
//! let store = Arc::new(MemoryChunkStore::new(StoreConfig::default()));
//!
//! let uploads = UploadPipeline::new(store.clone(), StoreConfig::default());
//! let receipt = uploads
//!     .commit(Bytes::from_static(b"hello"), "hello.txt", "text/plain")
//!     .await?;
//!
//! let downloads = DownloadPipeline::new(store);
//! let reply = downloads.fetch(receipt.id.as_str(), Some("bytes=0-1")).await?;
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

mod config;
mod download;
mod error;
mod memory;
mod range;
pub mod store;
mod types;
mod upload;

// Re-export main types for clean API
pub use config::StoreConfig;
pub use download::{DownloadPipeline, DownloadReply};
pub use error::{BlobError, BlobResult};
pub use memory::MemoryChunkStore;
pub use range::parse_range;
pub use store::{ChunkStore, UploadSink};
pub use types::{BlobId, ByteStream, ByteWindow, ObjectInfo, ObjectMetadata, UploadReceipt};
pub use upload::UploadPipeline;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        BlobError, BlobId, BlobResult, ByteStream, ByteWindow, ChunkStore, DownloadPipeline,
        DownloadReply, MemoryChunkStore, ObjectInfo, ObjectMetadata, StoreConfig, UploadPipeline,
        UploadReceipt,
    };
}
