//! Error types for flood.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloodError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No requests to dispatch")]
    QueueEmpty,

    #[error("No dispatches to undo")]
    NothingToUndo,

    #[error("Request ids exhausted: ledger already holds id {0}")]
    IdsExhausted(u64),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(FloodError::from(io), FloodError::Io(_)));
    }

    #[test]
    fn test_messages_match_api() {
        assert_eq!(FloodError::QueueEmpty.to_string(), "No requests to dispatch");
        assert_eq!(FloodError::NothingToUndo.to_string(), "No dispatches to undo");
    }
}
