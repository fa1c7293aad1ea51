use bytes::Bytes;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use uuid::Uuid;

/// Stream of bytes for object content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Unique identifier for a stored object, assigned by the store at commit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(pub String);

impl BlobId {
    /// Generate a new random blob ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata recorded alongside an object at upload time, immutable after commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub content_type: String,
}

impl ObjectMetadata {
    pub fn new<S: Into<String>>(content_type: S) -> Self {
        Self {
            content_type: content_type.into(),
        }
    }
}

/// Descriptor for a stored object, owned entirely by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub id: BlobId,
    pub length: u64,
    pub filename: String,
    pub metadata: ObjectMetadata,
}

/// Receipt returned once an upload has been durably committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: BlobId,
}

/// Inclusive byte window within a stored object.
///
/// `start` and `end` are derived independently from client input and are
/// not guaranteed valid at construction; callers must check
/// [`is_satisfiable`](Self::is_satisfiable) against the object length
/// before opening a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteWindow {
    pub start: u64,
    pub end: u64,
}

impl ByteWindow {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// A window is unsatisfiable iff either offset falls outside the object
    pub fn is_satisfiable(&self, length: u64) -> bool {
        self.start < length && self.end < length
    }

    /// Transmission length declared for this window.
    ///
    /// Quirk carried over from the original service: a single-byte window
    /// (`start == end`) declares a length of 0 even though the inclusive
    /// stream still carries exactly one byte. Consumers depend on this, so
    /// it is preserved rather than corrected.
    pub fn declared_len(&self) -> u64 {
        if self.start == self.end {
            0
        } else {
            self.end.saturating_sub(self.start) + 1
        }
    }
}

impl std::fmt::Display for ByteWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
