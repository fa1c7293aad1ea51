use std::sync::Arc;

use anyhow::Result;
use depot_axum::{AppState, ServerConfig};
use depot_blob::{MemoryChunkStore, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env();
    let store_config = StoreConfig::default();
    let store = Arc::new(MemoryChunkStore::new(store_config.clone()));
    let state = AppState::new(store, store_config, config.max_upload_bytes);

    let addr = config.bind_addr();
    println!("[depot] listening on http://{addr}");

    depot_axum::serve(addr, state).await
}
