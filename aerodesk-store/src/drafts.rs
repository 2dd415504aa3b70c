use aerodesk_catalog::PricingResult;
use aerodesk_core::{CoreError, CoreResult, RecordStore};
use aerodesk_shared::DraftRecord;
use serde_json::Value;

/// Persist a finished draft under a host-chosen key
pub async fn save_draft<S>(store: &S, key: &str, draft: &DraftRecord) -> CoreResult<()>
where
    S: RecordStore + ?Sized,
{
    write(store, key, &draft.to_json()).await
}

/// Load a draft for use as a wizard's editing record.
///
/// Date fields come back as text; re-open the record through the wizard
/// (`rehydrate`) to restore them as dates.
pub async fn load_draft<S>(store: &S, key: &str) -> CoreResult<Option<DraftRecord>>
where
    S: RecordStore + ?Sized,
{
    match read(store, key).await? {
        Some(value) => Ok(Some(DraftRecord::from_json(&value)?)),
        None => Ok(None),
    }
}

pub async fn save_pricing<S>(store: &S, key: &str, result: &PricingResult) -> CoreResult<()>
where
    S: RecordStore + ?Sized,
{
    write(store, key, &serde_json::to_value(result)?).await
}

pub async fn load_pricing<S>(store: &S, key: &str) -> CoreResult<Option<PricingResult>>
where
    S: RecordStore + ?Sized,
{
    match read(store, key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Drop whatever is stored under `key` (e.g. a draft discarded on cancel)
pub async fn discard<S>(store: &S, key: &str) -> CoreResult<()>
where
    S: RecordStore + ?Sized,
{
    store
        .remove_record(key)
        .await
        .map_err(|e| CoreError::StoreError(e.to_string()))
}

async fn read<S>(store: &S, key: &str) -> CoreResult<Option<Value>>
where
    S: RecordStore + ?Sized,
{
    store
        .read_record(key)
        .await
        .map_err(|e| CoreError::StoreError(e.to_string()))
}

async fn write<S>(store: &S, key: &str, value: &Value) -> CoreResult<()>
where
    S: RecordStore + ?Sized,
{
    store
        .write_record(key, value)
        .await
        .map_err(|e| CoreError::StoreError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryRecordStore;
    use aerodesk_catalog::{PriceAggregator, PricingContext};
    use aerodesk_shared::{DateValue, DraftValue};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn test_draft_round_trip_through_store() {
        let store = MemoryRecordStore::new();
        let draft = DraftRecord::new()
            .with("name", "Carry-on policy")
            .with("cabins", DraftValue::selection(["economy", "premium"]));

        save_draft(&store, "policy:carry-on", &draft).await.unwrap();
        let loaded = load_draft(&store, "policy:carry-on").await.unwrap();

        assert_eq!(loaded, Some(draft));
        assert_eq!(load_draft(&store, "policy:other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_stored_draft() {
        let store = MemoryRecordStore::new();
        store.write_record("broken", &json!("just a string")).await.unwrap();

        let result = load_draft(&store, "broken").await;
        assert!(matches!(result, Err(CoreError::DraftError(_))));
    }

    #[tokio::test]
    async fn test_pricing_round_trip_and_discard() {
        let store = MemoryRecordStore::new();
        let result = PriceAggregator::default()
            .calculate(&PricingContext::new(2).with_base_cost(300.0))
            .unwrap();

        save_pricing(&store, "booking:42:pricing", &result).await.unwrap();
        assert_eq!(load_pricing(&store, "booking:42:pricing").await.unwrap(), Some(result));

        discard(&store, "booking:42:pricing").await.unwrap();
        assert!(load_pricing(&store, "booking:42:pricing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stored_dates_load_as_text() {
        let store = MemoryRecordStore::new();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let draft = DraftRecord::new()
            .with("name", "Summer promo")
            .with("validFrom", DateValue::Valid(start));

        save_draft(&store, "promo:summer", &draft).await.unwrap();
        let loaded = load_draft(&store, "promo:summer").await.unwrap().unwrap();

        assert_eq!(loaded.text("validFrom"), Some("2025-06-01T00:00:00+00:00"));
        assert_eq!(loaded.date("validFrom"), None);
    }
}
