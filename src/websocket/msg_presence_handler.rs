use tracing::debug;

use crate::models::{CursorMoveMessage, JoinWorkspaceMessage};
use crate::ws::hub::RelayHub;

/// Handle JoinWorkspaceMessage
pub fn handle_join_message(join_msg: &JoinWorkspaceMessage, connection_id: &str, hub: &RelayHub) {
    if join_msg.user.email.is_empty() {
        debug!("Join from {} without an email, using defaults", connection_id);
    }
    hub.join(connection_id, join_msg);
}

/// Handle CursorMoveMessage
pub fn handle_cursor_message(cursor_msg: &CursorMoveMessage, connection_id: &str, hub: &RelayHub) {
    hub.cursor_move(connection_id, cursor_msg);
}
