// Infrastructure layer - External dependencies and adapters
pub mod channel_broadcaster;
pub mod config;
pub mod http_response;
