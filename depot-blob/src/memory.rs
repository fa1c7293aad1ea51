use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tokio::sync::RwLock;

use crate::{
    BlobError, BlobId, BlobResult, ByteStream, ByteWindow, ChunkStore, ObjectInfo, ObjectMetadata,
    StoreConfig, UploadSink,
};

struct StoredObject {
    info: ObjectInfo,
    chunks: Vec<Bytes>,
}

struct Inner {
    objects: RwLock<HashMap<String, StoredObject>>,
    closed: AtomicBool,
}

/// In-memory chunked object store.
///
/// Objects are held as fixed-size chunk sequences; range reads slice only
/// the chunks overlapping the requested window. Streams opened before a
/// concurrent write or close observe a consistent snapshot (chunks are
/// refcounted `Bytes`), so independent requests never affect each other.
#[derive(Clone)]
pub struct MemoryChunkStore {
    chunk_size: usize,
    inner: Arc<Inner>,
}

impl MemoryChunkStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            inner: Arc::new(Inner {
                objects: RwLock::new(HashMap::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Number of committed objects currently held
    pub async fn object_count(&self) -> usize {
        self.inner.objects.read().await.len()
    }

    fn ensure_open(&self) -> BlobResult<()> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(BlobError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn find(&self, id: &str) -> BlobResult<Option<ObjectInfo>> {
        self.ensure_open()?;
        let objects = self.inner.objects.read().await;
        Ok(objects.get(id).map(|entry| entry.info.clone()))
    }

    async fn open_download_stream(
        &self,
        id: &str,
        window: Option<ByteWindow>,
    ) -> BlobResult<ByteStream> {
        self.ensure_open()?;
        let objects = self.inner.objects.read().await;
        let entry = objects
            .get(id)
            .ok_or_else(|| BlobError::not_found(id))?;

        let length = entry.info.length;
        let (start, end) = match window {
            Some(w) => (w.start, w.end),
            None => (0, length.saturating_sub(1)),
        };

        // Snapshot only the overlapping slices; clones are refcounted.
        let chunk_size = self.chunk_size as u64;
        let mut pieces = Vec::new();
        if length > 0 {
            for (index, chunk) in entry.chunks.iter().enumerate() {
                let offset = index as u64 * chunk_size;
                let chunk_end = offset + chunk.len() as u64 - 1;
                if chunk_end < start {
                    continue;
                }
                if offset > end {
                    break;
                }
                let lo = start.max(offset) - offset;
                let hi = end.min(chunk_end) - offset;
                if lo > hi {
                    continue;
                }
                pieces.push(chunk.slice(lo as usize..(hi + 1) as usize));
            }
        }
        drop(objects);

        let stream = stream! {
            for piece in pieces {
                yield Ok(piece);
            }
        };
        Ok(Box::pin(stream))
    }

    async fn open_upload_stream(
        &self,
        filename: &str,
        metadata: ObjectMetadata,
    ) -> BlobResult<Box<dyn UploadSink>> {
        self.ensure_open()?;
        Ok(Box::new(MemoryUploadSink {
            inner: Arc::clone(&self.inner),
            chunk_size: self.chunk_size,
            id: BlobId::new(),
            filename: filename.to_string(),
            metadata,
            pending: BytesMut::new(),
            chunks: Vec::new(),
            length: 0,
        }))
    }

    async fn close(&self) -> BlobResult<()> {
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.objects.write().await.clear();
        Ok(())
    }
}

struct MemoryUploadSink {
    inner: Arc<Inner>,
    chunk_size: usize,
    id: BlobId,
    filename: String,
    metadata: ObjectMetadata,
    pending: BytesMut,
    chunks: Vec<Bytes>,
    length: u64,
}

#[async_trait]
impl UploadSink for MemoryUploadSink {
    async fn write(&mut self, chunk: Bytes) -> BlobResult<()> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(BlobError::Closed);
        }
        self.length += chunk.len() as u64;
        self.pending.extend_from_slice(&chunk);
        while self.pending.len() >= self.chunk_size {
            self.chunks.push(self.pending.split_to(self.chunk_size).freeze());
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> BlobResult<BlobId> {
        let mut this = *self;
        if this.inner.closed.load(Ordering::SeqCst) {
            return Err(BlobError::Closed);
        }
        if !this.pending.is_empty() {
            this.chunks.push(this.pending.split().freeze());
        }

        let info = ObjectInfo {
            id: this.id.clone(),
            length: this.length,
            filename: this.filename,
            metadata: this.metadata,
        };

        let mut objects = this.inner.objects.write().await;
        objects.insert(
            this.id.to_string(),
            StoredObject {
                info,
                chunks: this.chunks,
            },
        );
        Ok(this.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn create_test_store() -> MemoryChunkStore {
        // Small chunks so short payloads still span several of them
        MemoryChunkStore::new(StoreConfig::default().with_chunk_size(4))
    }

    async fn store_object(store: &MemoryChunkStore, data: &[u8]) -> BlobId {
        let mut sink = store
            .open_upload_stream("test.bin", ObjectMetadata::new("application/octet-stream"))
            .await
            .unwrap();
        sink.write(Bytes::copy_from_slice(data)).await.unwrap();
        sink.commit().await.unwrap()
    }

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn committed_object_is_findable_with_metadata() {
        let store = create_test_store();
        let id = store_object(&store, b"hello chunked world").await;

        let info = store.find(id.as_str()).await.unwrap().unwrap();
        assert_eq!(info.id, id);
        assert_eq!(info.length, 19);
        assert_eq!(info.filename, "test.bin");
        assert_eq!(info.metadata.content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn find_unknown_or_malformed_id_is_none() {
        let store = create_test_store();
        assert!(store.find("no-such-object").await.unwrap().is_none());
        assert!(store.find("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn full_read_preserves_bytes_and_order() {
        let store = create_test_store();
        let data = b"abcdefghijklmnopqrstuvwxyz";
        let id = store_object(&store, data).await;

        let stream = store.open_download_stream(id.as_str(), None).await.unwrap();
        assert_eq!(collect(stream).await, data);
    }

    #[tokio::test]
    async fn range_read_slices_across_chunk_boundaries() {
        let store = create_test_store();
        let id = store_object(&store, b"abcdefghij").await;

        // chunk_size = 4: chunks are abcd|efgh|ij; window spans all three
        let stream = store
            .open_download_stream(id.as_str(), Some(ByteWindow::new(3, 8)))
            .await
            .unwrap();
        assert_eq!(collect(stream).await, b"defghi");
    }

    #[tokio::test]
    async fn range_read_within_one_chunk() {
        let store = create_test_store();
        let id = store_object(&store, b"abcdefghij").await;

        let stream = store
            .open_download_stream(id.as_str(), Some(ByteWindow::new(5, 6)))
            .await
            .unwrap();
        assert_eq!(collect(stream).await, b"fg");
    }

    #[tokio::test]
    async fn single_byte_window_yields_exactly_one_byte() {
        let store = create_test_store();
        let id = store_object(&store, b"abcdefghij").await;

        let stream = store
            .open_download_stream(id.as_str(), Some(ByteWindow::new(4, 4)))
            .await
            .unwrap();
        assert_eq!(collect(stream).await, b"e");
    }

    #[tokio::test]
    async fn concurrent_streams_are_independent() {
        let store = create_test_store();
        let id = store_object(&store, b"abcdefghij").await;

        let a = store
            .open_download_stream(id.as_str(), Some(ByteWindow::new(0, 3)))
            .await
            .unwrap();
        let b = store
            .open_download_stream(id.as_str(), Some(ByteWindow::new(6, 9)))
            .await
            .unwrap();

        let (a, b) = tokio::join!(collect(a), collect(b));
        assert_eq!(a, b"abcd");
        assert_eq!(b, b"ghij");
    }

    #[tokio::test]
    async fn writes_larger_than_chunk_size_are_rechunked() {
        let store = create_test_store();
        let mut sink = store
            .open_upload_stream("big.bin", ObjectMetadata::new("application/octet-stream"))
            .await
            .unwrap();
        sink.write(Bytes::from_static(b"0123456789")).await.unwrap();
        sink.write(Bytes::from_static(b"ab")).await.unwrap();
        let id = sink.commit().await.unwrap();

        let info = store.find(id.as_str()).await.unwrap().unwrap();
        assert_eq!(info.length, 12);

        let stream = store.open_download_stream(id.as_str(), None).await.unwrap();
        assert_eq!(collect(stream).await, b"0123456789ab");
    }

    #[tokio::test]
    async fn empty_object_streams_no_bytes() {
        let store = create_test_store();
        let sink = store
            .open_upload_stream("empty.bin", ObjectMetadata::new("application/octet-stream"))
            .await
            .unwrap();
        let id = sink.commit().await.unwrap();

        let stream = store.open_download_stream(id.as_str(), None).await.unwrap();
        assert_eq!(collect(stream).await, b"");
    }

    #[tokio::test]
    async fn closed_store_rejects_operations() {
        let store = create_test_store();
        let id = store_object(&store, b"abc").await;

        store.close().await.unwrap();

        assert!(matches!(
            store.find(id.as_str()).await,
            Err(BlobError::Closed)
        ));
        assert!(matches!(
            store.open_download_stream(id.as_str(), None).await,
            Err(BlobError::Closed)
        ));
        assert!(matches!(
            store
                .open_upload_stream("x", ObjectMetadata::new("text/plain"))
                .await
                .err(),
            Some(BlobError::Closed)
        ));
    }
}
