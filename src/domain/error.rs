// Domain errors for eye report ingestion
use thiserror::Error;

/// Why an eye report was rejected. A rejected report never touches session state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Expected a JSON object")]
    NotAnObject,
    #[error("Missing 'status' in data")]
    MissingStatus,
    #[error("Malformed eye report: {0}")]
    Malformed(String),
}
