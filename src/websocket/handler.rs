use std::sync::Arc;
use axum::{
    extract::{State, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::Response,
};
use tracing::{debug, error, info, warn};
use futures_util::{StreamExt, SinkExt};

use crate::AppState;
use crate::models::ReceivedMessage;
use crate::websocket::msg_grid_handler::handle_grid_message;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_presence_handler::{handle_cursor_message, handle_join_message};

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    debug!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {

    // Register the connection, everything addressed to it lands in the outbox
    let (connection_id, mut outbox) = app_state.hub.connect();

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Drain the outbox into the socket
    let writer_id = connection_id.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(msg) = outbox.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize message for {}: {}", writer_id, e);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    // Read client frames and apply them to the hub
    let reader_state = app_state.clone();
    let reader_id = connection_id.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    debug!("WebSocket error for {}: {}", reader_id, e);
                    break;
                }
            };

            // Malformed frames are dropped, the sender is not told
            let json_msg: ReceivedMessage = match serde_json::from_str(&text) {
                Ok(json_msg) => json_msg,
                Err(e) => {
                    warn!("Failed to parse message from {}: {}", reader_id, e);
                    continue;
                }
            };

            let hub = &reader_state.hub;
            match json_msg {
                ReceivedMessage::JoinWorkspace(join_msg) => handle_join_message(&join_msg, &reader_id, hub),
                ReceivedMessage::CursorMove(cursor_msg) => handle_cursor_message(&cursor_msg, &reader_id, hub),
                ReceivedMessage::GridUpdate(grid_msg) => handle_grid_message(&grid_msg, &reader_id, hub),
                ReceivedMessage::Ping(_) => handle_ping_message(&reader_id, hub),
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut read_task) => write_task.abort(),
        _ = (&mut write_task) => read_task.abort(),
    };

    app_state.hub.disconnect(&connection_id);
    info!("WebSocket connection {} terminated", connection_id);
}
