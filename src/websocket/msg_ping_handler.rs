use tracing::debug;

use crate::ws::hub::RelayHub;

/// Handle PingMessage - send a pong back to the caller.
pub fn handle_ping_message(connection_id: &str, hub: &RelayHub) {
    debug!("Ping message received from {}", connection_id);
    hub.pong(connection_id);
}
