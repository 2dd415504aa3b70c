pub mod app_config;
pub mod drafts;
pub mod memory_repo;
pub mod redis_repo;

pub use app_config::{Config, StoreBackend, StoreConfig};
pub use memory_repo::MemoryRecordStore;
pub use redis_repo::RedisRecordStore;

use std::sync::Arc;

use aerodesk_core::{CoreError, CoreResult, RecordStore};
use tracing::info;

/// Build the record store selected by configuration
pub async fn build_store(config: &StoreConfig) -> CoreResult<Arc<dyn RecordStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory record store");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| CoreError::ValidationError("store.redis_url is required for the redis backend".to_string()))?;
            let store = RedisRecordStore::new(url, &config.key_prefix)
                .await
                .map_err(|e| CoreError::StoreError(e.to_string()))?;
            info!("Using Redis record store");
            Ok(Arc::new(store))
        }
    }
}
