use async_trait::async_trait;
use bytes::Bytes;

use crate::{BlobId, BlobResult, ByteStream, ByteWindow, ObjectInfo, ObjectMetadata};

/// Chunked object storage operations - must be implemented by all backends.
///
/// A store is a long-lived resource shared by every request; it must
/// isolate concurrent read and write streams from one another. Handlers
/// never lock around it.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Look up an object descriptor by id.
    ///
    /// `Ok(None)` covers both a missing object and an id the store's id
    /// scheme does not recognize.
    async fn find(&self, id: &str) -> BlobResult<Option<ObjectInfo>>;

    /// Open an ordered chunk producer over the object's bytes, restricted
    /// to `[start, end]` inclusive when a window is given.
    ///
    /// Chunks are produced lazily; a chunk is materialized only when the
    /// consumer polls for it, so the consumer's flow control is the
    /// backpressure. Dropping the stream releases the cursor.
    async fn open_download_stream(
        &self,
        id: &str,
        window: Option<ByteWindow>,
    ) -> BlobResult<ByteStream>;

    /// Open a write stream for a new object tagged with `filename` and
    /// `metadata`. The object does not exist until the sink commits.
    async fn open_upload_stream(
        &self,
        filename: &str,
        metadata: ObjectMetadata,
    ) -> BlobResult<Box<dyn UploadSink>>;

    /// Close the store. Subsequent operations fail with
    /// [`BlobError::Closed`](crate::BlobError::Closed).
    async fn close(&self) -> BlobResult<()>;
}

/// Byte-chunk consumer for an in-flight upload
#[async_trait]
pub trait UploadSink: Send {
    /// Append a chunk to the pending object
    async fn write(&mut self, chunk: Bytes) -> BlobResult<()>;

    /// Durably commit the pending object and return its assigned id
    async fn commit(self: Box<Self>) -> BlobResult<BlobId>;
}
