use std::io;

use thiserror::Error;

use crate::response::DecodeError;

#[derive(Debug, Error)]
pub enum RconError {
    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to configure socket: {0}")]
    Config(#[source] io::Error),

    #[error("did not conform to rcon protocol: {0}")]
    Protocol(String),

    #[error("authentication failed")]
    AuthFailed,

    #[error("operation timed out")]
    Timeout,

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("failed to send frame: {0}")]
    Write(#[source] io::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] DecodeError),

    #[error("client is not connected")]
    NotConnected,

    #[error("io error: {0}")]
    Io(io::Error),
}

impl RconError {
    /// Whether the error leaves the underlying stream unusable.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RconError::Timeout | RconError::ConnectionClosed | RconError::Write(_) | RconError::Io(_)
        )
    }
}

impl From<io::Error> for RconError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => RconError::ConnectionClosed,
            _ => RconError::Io(e),
        }
    }
}
