use serde_json::json;

use super::*;

// =============================================================================
// KEY SCHEME
// =============================================================================

#[test]
fn keys_follow_collection_id_scheme() {
    assert_eq!(court_key("1"), "court:1");
    assert_eq!(offer_key("2"), "offer:2");
    assert_eq!(booking_key("b17"), "booking:b17");
    assert_eq!(user_bookings_key("u1"), "booking:user:u1");
    assert_eq!(message_key("m9"), "message:m9");
    assert_eq!(user_key("u1"), "user:u1");
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[tokio::test]
async fn memory_store_set_then_get() {
    let store = MemoryStore::new();
    store.set("a", json!({"x": 1})).await.unwrap();
    assert_eq!(store.get("a").await.unwrap(), Some(json!({"x": 1})));
}

#[tokio::test]
async fn memory_store_get_missing_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("nope").await.unwrap(), None);
}

#[tokio::test]
async fn memory_store_set_overwrites() {
    let store = MemoryStore::new();
    store.set("a", json!(1)).await.unwrap();
    store.set("a", json!(2)).await.unwrap();
    assert_eq!(store.get("a").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn mget_is_aligned_with_keys() {
    let store = MemoryStore::new();
    store.set("a", json!("first")).await.unwrap();
    store.set("c", json!("third")).await.unwrap();
    let values = store
        .mget(&["a".into(), "b".into(), "c".into()])
        .await
        .unwrap();
    assert_eq!(values, vec![Some(json!("first")), None, Some(json!("third"))]);
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

#[tokio::test]
async fn get_record_deserializes() {
    let store = MemoryStore::new();
    store.set("n", json!([1, 2, 3])).await.unwrap();
    let record: Option<Vec<u32>> = get_record(&store, "n").await.unwrap();
    assert_eq!(record, Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn get_record_treats_malformed_as_missing() {
    let store = MemoryStore::new();
    store.set("n", json!("not a list")).await.unwrap();
    let record: Option<Vec<u32>> = get_record(&store, "n").await.unwrap();
    assert_eq!(record, None);
}

#[tokio::test]
async fn get_index_absent_is_empty() {
    let store = MemoryStore::new();
    assert!(get_index(&store, BOOKING_INDEX).await.unwrap().is_empty());
}

#[tokio::test]
async fn append_to_index_preserves_order() {
    let store = MemoryStore::new();
    append_to_index(&store, BOOKING_INDEX, "b1").await.unwrap();
    append_to_index(&store, BOOKING_INDEX, "b2").await.unwrap();
    append_to_index(&store, BOOKING_INDEX, "b3").await.unwrap();
    let ids = get_index(&store, BOOKING_INDEX).await.unwrap();
    assert_eq!(ids, vec!["b1", "b2", "b3"]);
}

#[tokio::test]
async fn resolve_index_skips_ids_without_records() {
    let store = MemoryStore::new();
    put_record(&store, COURT_INDEX, &vec!["1", "ghost", "2"]).await.unwrap();
    store.set(&court_key("1"), json!("one")).await.unwrap();
    store.set(&court_key("2"), json!("two")).await.unwrap();
    let records: Vec<String> = resolve_index(&store, COURT_INDEX, court_key).await.unwrap();
    assert_eq!(records, vec!["one", "two"]);
}

#[tokio::test]
async fn resolve_index_skips_malformed_records() {
    let store = MemoryStore::new();
    put_record(&store, COURT_INDEX, &vec!["1", "2"]).await.unwrap();
    store.set(&court_key("1"), json!(42)).await.unwrap();
    store.set(&court_key("2"), json!("ok")).await.unwrap();
    let records: Vec<String> = resolve_index(&store, COURT_INDEX, court_key).await.unwrap();
    assert_eq!(records, vec!["ok"]);
}
