/// Configuration for the chunked store and upload pipeline
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Size of each stored chunk in bytes
    pub chunk_size: usize,

    /// Absolute max size allowed for a single object (safety guard)
    pub max_object_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: 255 * 1024, // GridFS-compatible default
            max_object_bytes: 5 * 1024 * 1024 * 1024, // 5GB
        }
    }
}

impl StoreConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chunk size
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes;
        self
    }

    /// Set max object size
    pub fn with_max_object_bytes(mut self, bytes: u64) -> Self {
        self.max_object_bytes = bytes;
        self
    }
}
