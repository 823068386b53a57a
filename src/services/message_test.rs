use super::*;
use crate::store::MemoryStore;

fn submission(subject: &str) -> NewMessage {
    NewMessage {
        name: "Bob".into(),
        email: "bob@example.com".into(),
        subject: subject.to_owned(),
        body: "Do you rent rackets?".into(),
    }
}

#[tokio::test]
async fn create_starts_unread_and_indexes() {
    let store = MemoryStore::new();
    let message = create(&store, submission("Rentals")).await.unwrap();
    assert!(message.id.starts_with('m'));
    assert_eq!(message.status, MessageStatus::Unread);

    let index = store::get_index(&store, store::MESSAGE_INDEX).await.unwrap();
    assert_eq!(index, vec![message.id]);
}

#[tokio::test]
async fn list_all_is_newest_first() {
    let store = MemoryStore::new();
    let first = create(&store, submission("first")).await.unwrap();
    let second = create(&store, submission("second")).await.unwrap();

    // Same-instant timestamps are possible; force distinct dates.
    let mut older = first.clone();
    older.date = "2025-01-01T08:00:00Z".into();
    store::put_record(&store, &store::message_key(&older.id), &older).await.unwrap();
    let mut newer = second.clone();
    newer.date = "2025-01-02T08:00:00Z".into();
    store::put_record(&store, &store::message_key(&newer.id), &newer).await.unwrap();

    let messages = list_all(&store).await.unwrap();
    let subjects: Vec<&str> = messages.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["second", "first"]);
}

#[tokio::test]
async fn update_status_is_idempotent() {
    let store = MemoryStore::new();
    let message = create(&store, submission("Rentals")).await.unwrap();

    let once = update_status(&store, &message.id, MessageStatus::Read).await.unwrap();
    let twice = update_status(&store, &message.id, MessageStatus::Read).await.unwrap();

    assert_eq!(once.status, MessageStatus::Read);
    assert_eq!(twice.status, MessageStatus::Read);
    assert_eq!(once.id, twice.id);
    assert_eq!(once.date, twice.date);
    assert_eq!(once.body, twice.body);
}

#[tokio::test]
async fn update_status_missing_message_is_not_found() {
    let store = MemoryStore::new();
    let err = update_status(&store, "m404", MessageStatus::Read).await.unwrap_err();
    assert!(matches!(err, MessageError::NotFound(id) if id == "m404"));
}
