use std::sync::Arc;

use crate::{parse_range, BlobResult, ByteStream, ByteWindow, ChunkStore, ObjectInfo};

/// Outcome of a download request, one variant per terminal state.
///
/// The HTTP layer maps these 1:1 onto statuses; keeping the decision here
/// leaves this crate free of any protocol types.
pub enum DownloadReply {
    /// No object with that id (or an id the store does not recognize)
    NotFound,
    /// A range was requested but falls outside the object
    NotSatisfiable { length: u64 },
    /// Full-object delivery, no range requested
    Full { info: ObjectInfo, stream: ByteStream },
    /// Partial delivery restricted to `window`
    Partial {
        info: ObjectInfo,
        window: ByteWindow,
        stream: ByteStream,
    },
}

/// Orchestrates range-aware downloads against a shared store
#[derive(Clone)]
pub struct DownloadPipeline {
    store: Arc<dyn ChunkStore>,
}

impl DownloadPipeline {
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self { store }
    }

    /// Resolve a download request to its terminal reply.
    ///
    /// Looks up the object, parses the range header against its length,
    /// checks satisfiability, and opens the backing stream. A parsed
    /// window is unsatisfiable iff `start >= length` or `end >= length`.
    /// Store failures propagate as errors; they are not retried here.
    pub async fn fetch(
        &self,
        id: &str,
        range_header: Option<&str>,
    ) -> BlobResult<DownloadReply> {
        let Some(info) = self.store.find(id).await? else {
            tracing::debug!(id, "download lookup missed");
            return Ok(DownloadReply::NotFound);
        };

        let length = info.length;
        match parse_range(range_header, length) {
            Some(window) if !window.is_satisfiable(length) => {
                tracing::debug!(id, %window, length, "range not satisfiable");
                Ok(DownloadReply::NotSatisfiable { length })
            }
            Some(window) => {
                let stream = self
                    .store
                    .open_download_stream(id, Some(window))
                    .await?;
                tracing::debug!(id, %window, length, "serving partial content");
                Ok(DownloadReply::Partial {
                    info,
                    window,
                    stream,
                })
            }
            None => {
                let stream = self.store.open_download_stream(id, None).await?;
                tracing::debug!(id, length, "serving full object");
                Ok(DownloadReply::Full { info, stream })
            }
        }
    }
}
