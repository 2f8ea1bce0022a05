pub mod handler;
pub mod msg_grid_handler;
pub mod msg_ping_handler;
pub mod msg_presence_handler;
