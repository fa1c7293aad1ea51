use std::sync::Arc;

use bytes::Bytes;

use crate::{BlobError, BlobResult, ChunkStore, ObjectMetadata, StoreConfig, UploadReceipt};

/// Commits buffered payloads to the store as new objects.
///
/// The whole payload is held in memory before streaming to the store;
/// there are no partial or resumable semantics. This is the deliberate
/// counterpart to downloads, which never buffer the full object.
#[derive(Clone)]
pub struct UploadPipeline {
    store: Arc<dyn ChunkStore>,
    config: StoreConfig,
}

impl UploadPipeline {
    pub fn new(store: Arc<dyn ChunkStore>, config: StoreConfig) -> Self {
        Self { store, config }
    }

    /// Write `data` to the store tagged with `filename` and `content_type`
    /// and return the id assigned at commit.
    ///
    /// Callers must have already resolved a file payload; requests without
    /// one are rejected before this pipeline is ever invoked.
    pub async fn commit(
        &self,
        data: Bytes,
        filename: &str,
        content_type: &str,
    ) -> BlobResult<UploadReceipt> {
        if data.len() as u64 > self.config.max_object_bytes {
            return Err(BlobError::invalid(format!(
                "Payload of {} bytes exceeds maximum {}",
                data.len(),
                self.config.max_object_bytes
            )));
        }

        let mut sink = self
            .store
            .open_upload_stream(filename, ObjectMetadata::new(content_type))
            .await?;
        let length = data.len();
        sink.write(data).await?;
        let id = sink.commit().await?;

        tracing::debug!(%id, filename, content_type, length, "upload committed");
        Ok(UploadReceipt { id })
    }
}
