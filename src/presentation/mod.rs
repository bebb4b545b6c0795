// Presentation layer - HTTP and websocket entry points
pub mod app_state;
pub mod handlers;
pub mod socket;
