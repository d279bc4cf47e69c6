//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! HashMap / Vec をインメモリ DB として使用します。
//! DBMS を導入する際は、同じ trait の背後に実装を差し替えます。

use std::{
    collections::HashMap,
    sync::atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use baller_shared::time::unix_timestamp_ms;

use crate::domain::{
    ChatRepository, Event, EventId, EventMessage, EventRsvp, MessageId, NewEventMessage,
    RepositoryError, Timestamp, User, UserId,
};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    events: Mutex<HashMap<EventId, Event>>,
    users: Mutex<HashMap<UserId, User>>,
    rsvps: Mutex<Vec<EventRsvp>>,
    messages: Mutex<Vec<EventMessage>>,
    next_message_id: AtomicI64,
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new() -> Self {
        Self {
            events: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
            rsvps: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            next_message_id: AtomicI64::new(1),
        }
    }

    /// Insert or replace an event row.
    pub async fn insert_event(&self, event: Event) {
        self.events.lock().await.insert(event.id, event);
    }

    /// Insert or replace a user row.
    pub async fn insert_user(&self, user: User) {
        self.users.lock().await.insert(user.id.clone(), user);
    }

    /// Insert an RSVP row.
    pub async fn insert_rsvp(&self, rsvp: EventRsvp) {
        self.rsvps.lock().await.push(rsvp);
    }

    /// All persisted messages for an event, in insertion order.
    pub async fn messages_for_event(&self, event_id: EventId) -> Vec<EventMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|message| message.event_id == event_id)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn get_event_by_id(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError> {
        Ok(self.events.lock().await.get(&event_id).cloned())
    }

    async fn get_rsvps_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<EventRsvp>, RepositoryError> {
        Ok(self
            .rsvps
            .lock()
            .await
            .iter()
            .filter(|rsvp| &rsvp.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().await.get(user_id).cloned())
    }

    async fn create_event_message(
        &self,
        new_message: NewEventMessage,
    ) -> Result<EventMessage, RepositoryError> {
        let id = MessageId::new(self.next_message_id.fetch_add(1, Ordering::Relaxed));
        let message = EventMessage {
            id,
            event_id: new_message.event_id,
            user_id: new_message.user_id,
            message: new_message.message,
            created_at: Timestamp::new(unix_timestamp_ms()),
        };

        self.messages.lock().await.push(message.clone());
        Ok(message)
    }
}
