// Domain layer - Models and rules with no I/O
pub mod driver;
pub mod ear;
pub mod error;
pub mod event;
pub mod session;
pub mod statistics;
pub mod telemetry;
