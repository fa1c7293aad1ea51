//! Axum integration for Depot - HTTP handlers mapping range-aware
//! downloads and multipart uploads onto a chunked object store.
//!
//! `depot-blob` decides every outcome; this crate only translates
//! [`DownloadReply`](depot_blob::DownloadReply) variants into statuses
//! and headers, resolves multipart bodies, and owns process bootstrap.

pub mod app;
pub mod config;
pub mod error;
pub mod files;
pub mod multipart;
pub mod state;

pub use app::{build_router, serve};
pub use config::ServerConfig;
pub use error::DepotAxumError;
pub use multipart::ResolvedUpload;
pub use state::AppState;
