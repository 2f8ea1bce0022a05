use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::models::{
    CursorMoveMessage, CursorUpdateMessage, GridChangeMessage, GridUpdateMessage,
    JoinWorkspaceMessage, PresenceRecord, SendMessage, UserJoinedMessage, UserLeftMessage,
};
use crate::ws::palette;

/// A message addressed to one connection
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: String,
    pub message: SendMessage,
}

/// Members of one workspace room in join order, keyed by connection id
type Roster = IndexMap<String, PresenceRecord>;

/// In-memory workspace rooms.
///
/// Every operation mutates the rooms and returns the messages it produced.
/// Sending them is left to the caller.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Roster>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a connection into a workspace room, leaving any other room first.
    pub fn join(&mut self, connection_id: &str, msg: &JoinWorkspaceMessage) -> Vec<Delivery> {
        info!("User {} joining workspace {}", msg.user.email, msg.workspace_id);

        let mut deliveries = Vec::new();
        for workspace_id in self.rooms_of(connection_id) {
            if workspace_id != msg.workspace_id {
                deliveries.extend(self.leave(&workspace_id, connection_id));
            }
        }

        let record = PresenceRecord::new(connection_id, &msg.user, palette::color_for(connection_id));
        let roster = self.rooms.entry(msg.workspace_id.clone()).or_default();
        roster.insert(connection_id.to_string(), record.clone());
        let users: Vec<PresenceRecord> = roster.values().cloned().collect();

        deliveries.extend(broadcast_to_others(
            roster,
            connection_id,
            SendMessage::UserJoined(UserJoinedMessage {
                user: record,
                users: users.clone(),
            }),
        ));
        info!("Active users in workspace {}: {}", msg.workspace_id, users.len());
        deliveries.push(Delivery {
            to: connection_id.to_string(),
            message: SendMessage::WorkspaceUsers(users),
        });
        deliveries
    }

    /// Relay a cursor position. Dropped unless the sender is in the room.
    pub fn cursor_move(&self, connection_id: &str, msg: &CursorMoveMessage) -> Vec<Delivery> {
        let Some(roster) = self.rooms.get(&msg.workspace_id) else {
            return Vec::new();
        };
        let Some(user) = roster.get(connection_id) else {
            debug!("Dropping cursor from {} outside workspace {}", connection_id, msg.workspace_id);
            return Vec::new();
        };

        broadcast_to_others(
            roster,
            connection_id,
            SendMessage::CursorUpdate(CursorUpdateMessage {
                user_id: connection_id.to_string(),
                user: user.clone(),
                x: msg.x.clone(),
                y: msg.y.clone(),
                page: msg.page.clone(),
            }),
        )
    }

    /// Relay an opaque content update to everybody else in the room.
    pub fn grid_update(&self, connection_id: &str, msg: &GridUpdateMessage, timestamp: i64) -> Vec<Delivery> {
        info!("Grid update in workspace {}: {}", msg.workspace_id, msg.update_type);

        let Some(roster) = self.rooms.get(&msg.workspace_id) else {
            return Vec::new();
        };
        broadcast_to_others(
            roster,
            connection_id,
            SendMessage::GridChange(GridChangeMessage {
                user_id: connection_id.to_string(),
                page: msg.page.clone(),
                update_type: msg.update_type.clone(),
                data: msg.data.clone(),
                timestamp,
            }),
        )
    }

    /// Remove a connection from every room it is in.
    pub fn disconnect(&mut self, connection_id: &str) -> Vec<Delivery> {
        self.rooms_of(connection_id)
            .into_iter()
            .flat_map(|workspace_id| self.leave(&workspace_id, connection_id))
            .collect()
    }

    /// Current members of a workspace, in join order
    #[cfg(test)]
    pub fn roster(&self, workspace_id: &str) -> Vec<PresenceRecord> {
        self.rooms
            .get(workspace_id)
            .map(|roster| roster.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Workspaces whose roster holds the connection
    pub fn rooms_of(&self, connection_id: &str) -> Vec<String> {
        self.rooms
            .iter()
            .filter(|(_, roster)| roster.contains_key(connection_id))
            .map(|(workspace_id, _)| workspace_id.clone())
            .collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self) -> usize {
        self.rooms.values().map(IndexMap::len).sum()
    }

    fn leave(&mut self, workspace_id: &str, connection_id: &str) -> Vec<Delivery> {
        let Some(roster) = self.rooms.get_mut(workspace_id) else {
            return Vec::new();
        };
        let Some(user) = roster.shift_remove(connection_id) else {
            return Vec::new();
        };

        let deliveries = broadcast_to_others(
            roster,
            connection_id,
            SendMessage::UserLeft(UserLeftMessage {
                user_id: connection_id.to_string(),
                user,
                users: roster.values().cloned().collect(),
            }),
        );
        info!("User left workspace {}. Remaining users: {}", workspace_id, roster.len());

        if roster.is_empty() {
            self.rooms.remove(workspace_id);
            debug!("Workspace room {} removed", workspace_id);
        }
        deliveries
    }
}

fn broadcast_to_others(roster: &Roster, except: &str, message: SendMessage) -> Vec<Delivery> {
    roster
        .keys()
        .filter(|id| id.as_str() != except)
        .map(|id| Delivery {
            to: id.clone(),
            message: message.clone(),
        })
        .collect()
}
