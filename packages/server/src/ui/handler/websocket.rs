//! WebSocket connection handler: the relay's join/send/leave protocol.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use baller_shared::time::unix_timestamp_ms;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, EventId, Participant, Timestamp, UserId},
    infrastructure::dto::websocket::{ClientFrame, EventMessageDto, ServerFrame, UserSummaryDto},
    ui::{registry::RoomMember, state::AppState},
    usecase::{JoinEventUseCase, SendMessageUseCase},
};

/// Per-connection session state.
///
/// A socket is `AwaitingJoin` from open until a successful join and
/// `InRoom` from then until it closes. Join rejections leave the state
/// untouched so the client may retry on the same connection.
enum SessionState {
    AwaitingJoin,
    InRoom {
        event_id: EventId,
        participant: Participant,
    },
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = ConnectionIdFactory::generate();
    tracing::info!("Connection '{}' established", connection_id);

    // Channel feeding this connection's outbound writer task. Direct replies
    // and broadcasts from other connections both go through it, so every
    // write to the socket happens on one task.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let mut session = SessionState::AwaitingJoin;

    // Inbound frames of one connection are processed strictly in order here
    while let Some(message) = receiver.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        match message {
            Message::Text(text) => {
                handle_frame(&state, &tx, connection_id, &mut session, text.as_str()).await;
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is handled by the WebSocket layer
            _ => {}
        }
    }

    send_task.abort();

    // If the connection was in a room, drop it from the registry and notify
    // the remaining members.
    if let Some((event_id, participant)) = state.registry.unregister(&connection_id).await {
        tracing::info!(
            "Participant '{}' left room {}",
            participant.user_id(),
            event_id
        );

        let left = ServerFrame::UserLeft {
            user: UserSummaryDto::from(&participant.user),
        };
        broadcast_frame(&state, event_id, &left, None).await;
    }

    tracing::info!("Connection '{}' closed", connection_id);
}

/// Parse and dispatch one inbound frame.
///
/// Malformed input is answered with a single error frame and never changes
/// the session state or disturbs other rooms.
async fn handle_frame(
    state: &Arc<AppState>,
    tx: &mpsc::UnboundedSender<String>,
    connection_id: ConnectionId,
    session: &mut SessionState,
    raw: &str,
) {
    let frame = match serde_json::from_str::<ClientFrame>(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Malformed frame on '{}': {}", connection_id, e);
            reply_error(tx, "Invalid message format");
            return;
        }
    };

    match frame {
        ClientFrame::JoinEvent { event_id, user_id } => {
            handle_join(
                state,
                tx,
                connection_id,
                session,
                EventId::new(event_id),
                user_id,
            )
            .await;
        }
        ClientFrame::SendMessage { event_id, message } => {
            handle_send(state, tx, session, EventId::new(event_id), message).await;
        }
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    tx: &mpsc::UnboundedSender<String>,
    connection_id: ConnectionId,
    session: &mut SessionState,
    event_id: EventId,
    user_id: String,
) {
    // One room per connection; joining twice is rejected, not re-homed
    if let SessionState::InRoom { .. } = session {
        reply_error(tx, "Already joined an event chat");
        return;
    }

    // An invalid user id can never be a host or an RSVP holder
    let Ok(user_id) = UserId::try_from(user_id) else {
        reply_error(tx, "Access denied to event chat");
        return;
    };

    let usecase = JoinEventUseCase::new(state.repository.clone());
    let user = match usecase.execute(event_id, user_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Join rejected on '{}': {}", connection_id, e);
            reply_error(tx, &e.to_string());
            return;
        }
    };

    let participant = Participant::new(connection_id, user, Timestamp::new(unix_timestamp_ms()));

    state
        .registry
        .register(
            event_id,
            RoomMember {
                sender: tx.clone(),
                participant: participant.clone(),
            },
        )
        .await;

    tracing::info!(
        "Participant '{}' joined room {}",
        participant.user_id(),
        event_id
    );

    reply(
        tx,
        &ServerFrame::Joined {
            event_id: event_id.value(),
        },
    );

    let presence = ServerFrame::UserJoined {
        user: UserSummaryDto::from(&participant.user),
    };
    broadcast_frame(state, event_id, &presence, Some(connection_id)).await;

    *session = SessionState::InRoom {
        event_id,
        participant,
    };
}

async fn handle_send(
    state: &Arc<AppState>,
    tx: &mpsc::UnboundedSender<String>,
    session: &mut SessionState,
    event_id: EventId,
    text: String,
) {
    let SessionState::InRoom {
        event_id: joined_event_id,
        participant,
    } = session
    else {
        reply_error(tx, "Join an event before sending messages");
        return;
    };

    if *joined_event_id != event_id {
        reply_error(tx, "Not joined to this event chat");
        return;
    }

    let usecase = SendMessageUseCase::new(state.repository.clone());
    let saved = match usecase
        .execute(event_id, participant.user_id().clone(), text)
        .await
    {
        Ok(saved) => saved,
        Err(e) => {
            tracing::warn!(
                "Send rejected for '{}' in room {}: {}",
                participant.user_id(),
                event_id,
                e
            );
            reply_error(tx, &e.to_string());
            return;
        }
    };

    // The row is durable at this point; every member including the sender
    // sees the stored copy.
    let frame = ServerFrame::NewMessage {
        message: EventMessageDto::from(&saved),
        user: UserSummaryDto::from(&participant.user),
    };
    broadcast_frame(state, event_id, &frame, None).await;
}

fn reply(tx: &mpsc::UnboundedSender<String>, frame: &ServerFrame) {
    match serde_json::to_string(frame) {
        // The receiver only drops with the writer task; nothing to do then
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => tracing::error!("Failed to serialize server frame: {}", e),
    }
}

fn reply_error(tx: &mpsc::UnboundedSender<String>, message: &str) {
    reply(
        tx,
        &ServerFrame::Error {
            message: message.to_string(),
        },
    );
}

async fn broadcast_frame(
    state: &AppState,
    event_id: EventId,
    frame: &ServerFrame,
    exclude: Option<ConnectionId>,
) {
    match serde_json::to_string(frame) {
        Ok(json) => state.registry.broadcast(event_id, &json, exclude).await,
        Err(e) => tracing::error!("Failed to serialize broadcast frame: {}", e),
    }
}
