use std::collections::HashMap;

use aerodesk_core::{RecordStore, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-local record store; contents live as long as the value does
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn read_record(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn write_record(&self, key: &str, record: &Value) -> StoreResult<()> {
        self.records.write().await.insert(key.to_string(), record.clone());
        debug!("Record written: {}", key);
        Ok(())
    }

    async fn remove_record(&self, key: &str) -> StoreResult<()> {
        self.records.write().await.remove(key);
        Ok(())
    }
}
