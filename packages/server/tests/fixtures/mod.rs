//! Shared fixtures for integration tests.
//!
//! Provides a background `TestServer`, seeded repositories, and small
//! helpers for driving the WebSocket protocol from tests.

#![allow(dead_code)] // 各テストバイナリは一部のヘルパーのみ使用する

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use baller_server::domain::{
    ChatRepository, Event, EventId, EventMessage, EventRsvp, NewEventMessage, RepositoryError,
    RsvpStatus, User, UserId,
};
use baller_server::infrastructure::dto::websocket::{ClientFrame, ServerFrame};
use baller_server::infrastructure::repository::InMemoryChatRepository;
use baller_server::{ServerConfig, run};

/// Timeout for expecting a frame from the relay.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Window in which no frame must arrive.
pub const SILENCE_TIMEOUT: Duration = Duration::from_millis(300);

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A relay server running on a background task for the duration of a test.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on the given port and wait until it accepts
    /// connections.
    pub async fn start(port: u16, repository: Arc<dyn ChatRepository>) -> Self {
        tokio::spawn(run(
            ServerConfig {
                host: "127.0.0.1".to_string(),
                port,
            },
            repository,
        ));

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    async fn wait_until_ready(&self) {
        let addr: SocketAddr = format!("127.0.0.1:{}", self.port).parse().unwrap();
        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_ok() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("server did not start listening on port {}", self.port);
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

pub fn user(id: &str, first_name: &str) -> User {
    User::new(user_id(id), Some(first_name.to_string()), None, None)
}

pub fn event(id: i64, host: &str, title: &str) -> Event {
    Event::new(
        EventId::new(id),
        user_id(host),
        title.to_string(),
        "basketball".to_string(),
    )
}

pub fn rsvp(event_id: i64, user: &str) -> EventRsvp {
    EventRsvp::new(EventId::new(event_id), user_id(user), RsvpStatus::Joined)
}

/// Repository seeded with event 7: hosted by "alice", "bob" holds an RSVP,
/// "carol" has neither.
pub async fn seeded_repository() -> Arc<InMemoryChatRepository> {
    let repo = Arc::new(InMemoryChatRepository::new());
    repo.insert_user(user("alice", "Alice")).await;
    repo.insert_user(user("bob", "Bob")).await;
    repo.insert_user(user("carol", "Carol")).await;
    repo.insert_event(event(7, "alice", "Pickup basketball")).await;
    repo.insert_rsvp(rsvp(7, "bob")).await;
    repo
}

/// Wraps the in-memory repository and fails message inserts on demand.
pub struct FailingChatRepository {
    inner: Arc<InMemoryChatRepository>,
    fail_writes: AtomicBool,
}

impl FailingChatRepository {
    pub fn new(inner: Arc<InMemoryChatRepository>) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatRepository for FailingChatRepository {
    async fn get_event_by_id(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError> {
        self.inner.get_event_by_id(event_id).await
    }

    async fn get_rsvps_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<EventRsvp>, RepositoryError> {
        self.inner.get_rsvps_by_user(user_id).await
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.inner.get_user(user_id).await
    }

    async fn create_event_message(
        &self,
        new_message: NewEventMessage,
    ) -> Result<EventMessage, RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("injected failure".to_string()));
        }
        self.inner.create_event_message(new_message).await
    }
}

/// Open a WebSocket connection to the relay.
pub async fn connect(server: &TestServer) -> WsClient {
    let (ws, _) = connect_async(server.ws_url())
        .await
        .expect("WebSocket connect failed");
    ws
}

pub async fn send_frame(ws: &mut WsClient, frame: &ClientFrame) {
    let json = serde_json::to_string(frame).unwrap();
    ws.send(Message::Text(json.into())).await.expect("send failed");
}

pub async fn send_raw(ws: &mut WsClient, raw: &str) {
    ws.send(Message::Text(raw.to_string().into()))
        .await
        .expect("send failed");
}

/// Receive the next server frame, skipping non-text messages.
pub async fn recv_frame(ws: &mut WsClient) -> ServerFrame {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            let message = ws
                .next()
                .await
                .expect("connection closed")
                .expect("read failed");
            if let Message::Text(text) = message {
                return serde_json::from_str::<ServerFrame>(text.as_str())
                    .expect("unparseable server frame");
            }
        }
    })
    .await
    .expect("timed out waiting for a server frame")
}

/// Assert that no frame arrives within the silence window.
pub async fn expect_silence(ws: &mut WsClient) {
    let result = tokio::time::timeout(SILENCE_TIMEOUT, ws.next()).await;
    assert!(result.is_err(), "expected no frame, got {:?}", result);
}

/// Join an event room and assert the confirmation.
pub async fn join(ws: &mut WsClient, event_id: i64, user: &str) {
    send_frame(
        ws,
        &ClientFrame::JoinEvent {
            event_id,
            user_id: user.to_string(),
        },
    )
    .await;

    match recv_frame(ws).await {
        ServerFrame::Joined {
            event_id: joined_event_id,
        } => assert_eq!(joined_event_id, event_id),
        other => panic!("expected joined frame, got {other:?}"),
    }
}
