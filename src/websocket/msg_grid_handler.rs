use tracing::debug;

use crate::models::GridUpdateMessage;
use crate::ws::hub::RelayHub;

/// Handle GridUpdateMessage. The payload is forwarded as is.
pub fn handle_grid_message(grid_msg: &GridUpdateMessage, connection_id: &str, hub: &RelayHub) {
    debug!(
        "Grid update from {} for page {} in workspace {}",
        connection_id, grid_msg.page, grid_msg.workspace_id
    );
    hub.grid_update(connection_id, grid_msg);
}
