//! Contact-message service.
//!
//! Messages are created by anonymous contact-form submissions, enumerated
//! through `message:list`, and only ever mutated by admins flipping the
//! read status. Nothing is deleted.

use serde::Deserialize;

use crate::models::{Message, MessageStatus, now_rfc3339, next_id_millis};
use crate::store::{self, KvStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("message not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Contact-form fields. The body arrives under the JSON key `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
}

/// Store a new message and append it to the global index. Starts `unread`.
pub async fn create(store: &dyn KvStore, input: NewMessage) -> Result<Message, StoreError> {
    let id = format!("m{}", next_id_millis());
    let message = Message {
        id: id.clone(),
        name: input.name,
        email: input.email,
        subject: input.subject,
        body: input.body,
        date: now_rfc3339(),
        status: MessageStatus::Unread,
    };

    store::put_record(store, &store::message_key(&id), &message).await?;
    store::append_to_index(store, store::MESSAGE_INDEX, &id).await?;

    Ok(message)
}

/// List every message, newest first. Admin-only at the route layer.
pub async fn list_all(store: &dyn KvStore) -> Result<Vec<Message>, StoreError> {
    let mut messages: Vec<Message> =
        store::resolve_index(store, store::MESSAGE_INDEX, store::message_key).await?;
    messages.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(messages)
}

/// Overwrite a message's status in place. Idempotent.
pub async fn update_status(
    store: &dyn KvStore,
    id: &str,
    status: MessageStatus,
) -> Result<Message, MessageError> {
    let key = store::message_key(id);
    let mut message: Message = store::get_record(store, &key)
        .await?
        .ok_or_else(|| MessageError::NotFound(id.to_owned()))?;

    message.status = status;
    store::put_record(store, &key, &message).await?;
    Ok(message)
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
