use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{
    CursorMoveMessage, GridUpdateMessage, JoinWorkspaceMessage, PongMessage, SendMessage,
};
#[cfg(test)]
use crate::models::PresenceRecord;
use crate::ws::rooms::{Delivery, RoomRegistry};

/// Counters reported by the diagnostics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    pub connections: usize,
    pub rooms: usize,
    pub members: usize,
}

/// Outbox size used when none is configured
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

struct HubState {
    rooms: RoomRegistry,
    outboxes: HashMap<String, Sender<SendMessage>>,
}

/// Connection registry plus workspace rooms.
///
/// All operations run to completion under one lock and never await, so
/// they are applied one at a time in arrival order.
///
/// Outboxes are bounded. When one is full, cursor updates for it are
/// dropped and any other message closes the outbox, which ends that
/// connection through its writer task.
pub struct RelayHub {
    state: Mutex<HubState>,
    outbox_capacity: usize,
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayHub {
    pub fn new() -> Self {
        Self::with_outbox_capacity(DEFAULT_OUTBOX_CAPACITY)
    }

    pub fn with_outbox_capacity(outbox_capacity: usize) -> Self {
        Self {
            state: Mutex::new(HubState {
                rooms: RoomRegistry::new(),
                outboxes: HashMap::new(),
            }),
            outbox_capacity: outbox_capacity.max(1),
        }
    }

    /// Register a new connection and hand back its id and outbox
    pub fn connect(&self) -> (String, Receiver<SendMessage>) {
        let connection_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(self.outbox_capacity);
        self.lock().outboxes.insert(connection_id.clone(), tx);
        info!("User connected: {}", connection_id);
        (connection_id, rx)
    }

    pub fn join(&self, connection_id: &str, msg: &JoinWorkspaceMessage) {
        let mut state = self.lock();
        let deliveries = state.rooms.join(connection_id, msg);
        state.deliver(deliveries);
    }

    pub fn cursor_move(&self, connection_id: &str, msg: &CursorMoveMessage) {
        let mut state = self.lock();
        let deliveries = state.rooms.cursor_move(connection_id, msg);
        state.deliver(deliveries);
    }

    pub fn grid_update(&self, connection_id: &str, msg: &GridUpdateMessage) {
        let mut state = self.lock();
        let deliveries = state
            .rooms
            .grid_update(connection_id, msg, Utc::now().timestamp_millis());
        state.deliver(deliveries);
    }

    /// Answer a client ping on its own outbox
    pub fn pong(&self, connection_id: &str) {
        let mut state = self.lock();
        state.deliver(vec![Delivery {
            to: connection_id.to_string(),
            message: SendMessage::Pong(PongMessage {
                date: Utc::now().to_rfc3339(),
            }),
        }]);
    }

    /// Drop the connection's outbox and remove it from every room
    pub fn disconnect(&self, connection_id: &str) {
        let mut state = self.lock();
        state.outboxes.remove(connection_id);
        let deliveries = state.rooms.disconnect(connection_id);
        state.deliver(deliveries);
        info!("User disconnected: {}", connection_id);
    }

    #[cfg(test)]
    pub fn roster(&self, workspace_id: &str) -> Vec<PresenceRecord> {
        self.lock().rooms.roster(workspace_id)
    }

    pub fn stats(&self) -> RelayStats {
        let state = self.lock();
        RelayStats {
            connections: state.outboxes.len(),
            rooms: state.rooms.room_count(),
            members: state.rooms.member_count(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HubState {
    fn deliver(&mut self, deliveries: Vec<Delivery>) {
        for Delivery { to, message } in deliveries {
            let Some(outbox) = self.outboxes.get(&to) else {
                debug!("No outbox for connection {}", to);
                continue;
            };
            match outbox.try_send(message) {
                Ok(()) => {}
                Err(TrySendError::Full(SendMessage::CursorUpdate(_))) => {
                    debug!("Outbox for {} full, dropping cursor update", to);
                }
                Err(TrySendError::Full(_)) => {
                    warn!("Outbox for {} full, closing the connection", to);
                    self.outboxes.remove(&to);
                }
                Err(TrySendError::Closed(_)) => debug!("Outbox for {} already closed", to),
            }
        }
    }
}
