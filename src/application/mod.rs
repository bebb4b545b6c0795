// Application layer - Use cases and ports
pub mod broadcaster;
pub mod monitor_service;
