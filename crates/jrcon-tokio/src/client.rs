use crate::{session::Session, RconClientConfig};

/// Externally visible connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// No usable connection: never authenticated, closed, or dropped by the peer.
    Idle,
    /// Authenticated, and the socket is believed to be live.
    Connected,
}

/// One logical session to one RCON server.
///
/// Every exchanging operation takes `&mut self`, so at most one command is in
/// flight per client. Share a client between tasks behind a mutex.
#[derive(Debug)]
pub struct RconClient<S> {
    pub(crate) session: Option<Session<S>>,
    pub(crate) client_config: RconClientConfig,
    pub(crate) state: ClientState,
}

impl<S> RconClient<S> {
    /// Wraps an already open stream. The client stays `Idle` until
    /// [`authenticate`](RconClient::authenticate) succeeds.
    pub fn new(stream: S) -> Self {
        let client_config = RconClientConfig::default();
        RconClient {
            session: Some(Session::new(stream).with_chunk_size(client_config.read_chunk_size)),
            client_config,
            state: ClientState::Idle,
        }
    }

    pub fn with_client_config(mut self, config: RconClientConfig) -> Self {
        self.session = self.session.map(|s| s.with_chunk_size(config.read_chunk_size));
        self.client_config = config;
        self
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn address(&self) -> &str {
        &self.client_config.address
    }

    pub fn config(&self) -> &RconClientConfig {
        &self.client_config
    }

    /// Drops the session, if any, and returns to `Idle`.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Closed connection to {}", self.client_config.address);
        }
        self.state = ClientState::Idle;
    }
}
