//! Async client for a password-prompt RCON protocol with JSON responses.
//!
//! A connection greets with a password prompt, accepts the MD5 hex digest of
//! the password, and then answers each raw command string with one JSON
//! object. Frames are delimited by short reads, not by a length prefix.
pub mod client;
pub mod client_config;
pub mod connect;
pub mod credential;
pub mod errors;
pub mod execute;
pub mod handshake;
pub mod response;
pub mod session;

#[cfg(test)]
mod test_support;

pub use client::{ClientState, RconClient};
pub use client_config::RconClientConfig;
pub use errors::RconError;
pub use response::{CommandResponse, DecodeError};
pub use session::{Liveness, Session};
