use std::sync::Arc;

use depot_blob::{BlobResult, ChunkStore, DownloadPipeline, StoreConfig, UploadPipeline};

/// Shared application context handed to every handler.
///
/// Constructed once at startup around a single store handle; no ambient
/// singletons. The store supports concurrent independent streams, so
/// handlers never lock around it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChunkStore>,
    pub downloads: DownloadPipeline,
    pub uploads: UploadPipeline,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn ChunkStore>, config: StoreConfig, max_upload_bytes: usize) -> Self {
        Self {
            downloads: DownloadPipeline::new(Arc::clone(&store)),
            uploads: UploadPipeline::new(Arc::clone(&store), config),
            store,
            max_upload_bytes,
        }
    }

    /// Close the backing store; call exactly once on shutdown
    pub async fn shutdown(&self) -> BlobResult<()> {
        self.store.close().await
    }
}
