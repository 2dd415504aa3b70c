use async_trait::async_trait;
use serde_json::Value;

pub type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Key-value port for JSON-like records (finished drafts, pricing results).
///
/// Key names are chosen by the host; implementations treat them as opaque.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read_record(&self, key: &str) -> StoreResult<Option<Value>>;

    async fn write_record(&self, key: &str, record: &Value) -> StoreResult<()>;

    /// Removing a missing key is not an error
    async fn remove_record(&self, key: &str) -> StoreResult<()>;
}
