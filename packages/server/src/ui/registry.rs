//! Room registry: live connections grouped by event room.

use std::collections::HashMap;

use tokio::sync::{Mutex, mpsc};

use crate::domain::{ConnectionId, EventId, Participant};

/// A registered room member: a participant plus its outbound channel.
pub struct RoomMember {
    /// Channel feeding the connection's outbound writer task
    pub sender: mpsc::UnboundedSender<String>,
    /// Identity and display row of the connected user
    pub participant: Participant,
}

/// In-memory mapping from event id to the members of its chat room.
///
/// Rooms exist implicitly: an entry is created by the first `register` for
/// an event and removed when the last member unregisters, so room lifecycle
/// is derived state and needs no cleanup job. All map access is serialized
/// behind one mutex; the lock is never held across a repository call or a
/// socket write, so a slow persistence call cannot stall other rooms.
pub struct RoomRegistry {
    rooms: Mutex<HashMap<EventId, HashMap<ConnectionId, RoomMember>>>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// Register a member under an event room, creating the room if absent.
    pub async fn register(&self, event_id: EventId, member: RoomMember) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(event_id)
            .or_default()
            .insert(member.participant.connection_id, member);
    }

    /// Remove the connection from whichever room holds it.
    ///
    /// Returns the room and the removed participant (for the presence
    /// notice), or `None` when the connection was never registered. A room
    /// whose last member leaves is dropped from the registry.
    pub async fn unregister(
        &self,
        connection_id: &ConnectionId,
    ) -> Option<(EventId, Participant)> {
        let mut rooms = self.rooms.lock().await;

        let event_id = rooms.iter().find_map(|(event_id, members)| {
            members.contains_key(connection_id).then_some(*event_id)
        })?;

        let members = rooms.get_mut(&event_id)?;
        let removed = members.remove(connection_id)?;
        if members.is_empty() {
            rooms.remove(&event_id);
        }

        Some((event_id, removed.participant))
    }

    /// Send a pre-serialized payload to every member of a room except
    /// `exclude`.
    ///
    /// A member whose channel is closed is skipped, never an error; the
    /// stale entry is cleaned up when its connection task unregisters.
    pub async fn broadcast(
        &self,
        event_id: EventId,
        payload: &str,
        exclude: Option<ConnectionId>,
    ) {
        let rooms = self.rooms.lock().await;
        let Some(members) = rooms.get(&event_id) else {
            return;
        };

        for (connection_id, member) in members.iter() {
            if Some(*connection_id) == exclude {
                continue;
            }
            if member.sender.send(payload.to_string()).is_err() {
                tracing::warn!(
                    "Skipping closed connection '{}' in room {}",
                    connection_id,
                    event_id
                );
            }
        }
    }

    /// Snapshot of the participants currently in a room.
    ///
    /// Purely transient presence data, never authoritative for persistence.
    pub async fn members(&self, event_id: EventId) -> Vec<Participant> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(&event_id)
            .map(|members| {
                members
                    .values()
                    .map(|member| member.participant.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of rooms with at least one live member.
    pub async fn active_room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
