//! Error types
//!
//! Only binding the listener can surface an error to the caller. Everything
//! per-connection is logged and ends that connection alone.

use crate::registry::ConnectionId;

/// Error type for relay operations
#[derive(Debug)]
pub enum Error {
    /// Underlying socket error
    Io(std::io::Error),
    /// The connection's writer has gone away
    ConnectionClosed(ConnectionId),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::ConnectionClosed(id) => write!(f, "Connection closed: {}", id),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::ConnectionClosed(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
