use super::*;
use crate::store::MemoryStore;

#[tokio::test]
async fn cold_start_seed_writes_six_courts() {
    let store = MemoryStore::new();
    let written = seed_if_empty(&store).await.unwrap();
    assert_eq!(written, 6);

    let courts = list_courts(&store).await.unwrap();
    assert_eq!(courts.len(), 6);
    assert_eq!(courts[0].id, "1");
    assert_eq!(courts[0].name, "City Center Football Arena");
    assert_eq!(courts[5].name, "Sunset Tennis Club");
}

#[tokio::test]
async fn seed_is_idempotent() {
    let store = MemoryStore::new();
    seed_if_empty(&store).await.unwrap();
    let before = list_courts(&store).await.unwrap();

    let written = seed_if_empty(&store).await.unwrap();
    assert_eq!(written, 0);

    let after = list_courts(&store).await.unwrap();
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
    }
}

#[tokio::test]
async fn seed_skips_non_empty_store() {
    let store = MemoryStore::new();
    // Any existing index, even a shorter one, disables the seed.
    store::put_record(&store, store::COURT_INDEX, &vec!["1"]).await.unwrap();
    let written = seed_if_empty(&store).await.unwrap();
    assert_eq!(written, 0);
    assert_eq!(store::get_index(&store, store::COURT_INDEX).await.unwrap(), vec!["1"]);
}

#[tokio::test]
async fn get_court_by_id() {
    let store = MemoryStore::new();
    seed_if_empty(&store).await.unwrap();
    let court = get_court(&store, "3").await.unwrap().unwrap();
    assert_eq!(court.name, "Grand Tennis Academy");
    assert_eq!(court.price, 40);
}

#[tokio::test]
async fn get_court_missing_is_none() {
    let store = MemoryStore::new();
    seed_if_empty(&store).await.unwrap();
    assert!(get_court(&store, "99").await.unwrap().is_none());
}

#[tokio::test]
async fn seed_writes_four_offers() {
    let store = MemoryStore::new();
    seed_if_empty(&store).await.unwrap();
    let offers = list_offers(&store).await.unwrap();
    assert_eq!(offers.len(), 4);
    assert_eq!(offers[0].code, "WEEKEND25");
    assert_eq!(offers[3].min_booking, Some(3));
    assert!(offers[0].min_booking.is_none());
}

#[tokio::test]
async fn listings_on_empty_store_are_empty() {
    let store = MemoryStore::new();
    assert!(list_courts(&store).await.unwrap().is_empty());
    assert!(list_offers(&store).await.unwrap().is_empty());
}
