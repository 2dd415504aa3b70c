use aerodesk_core::{RecordStore, StoreResult};
use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::info;

/// Record store backed by plain Redis string keys holding JSON
#[derive(Clone)]
pub struct RedisRecordStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisRecordStore {
    pub async fn new(connection_string: &str, key_prefix: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self {
            client,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn read_record(&self, key: &str) -> StoreResult<Option<Value>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(self.key(key)).await?;

        match payload {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write_record(&self, key: &str, record: &Value) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(record)?;
        conn.set::<_, _, ()>(self.key(key), payload).await?;
        info!("Record stored: {}", key);
        Ok(())
    }

    async fn remove_record(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(self.key(key)).await?;
        Ok(())
    }
}
