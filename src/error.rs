//! Error types for msgboard
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BoardError
pub type Result<T> = std::result::Result<T, BoardError>;

/// Unified error type for msgboard operations
#[derive(Debug, Error)]
pub enum BoardError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("Unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("Server closed the connection")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// True when the error means the peer went away rather than a real fault
    pub fn is_disconnect(&self) -> bool {
        match self {
            BoardError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            BoardError::ConnectionClosed => true,
            _ => false,
        }
    }
}
