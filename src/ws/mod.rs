pub mod hub;
pub mod palette;
pub mod rooms;
